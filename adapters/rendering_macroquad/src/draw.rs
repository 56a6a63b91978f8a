//! Immediate-mode drawing of each scene view.

use firefly_core::Speaker;
use firefly_rendering::{
    centered_crop, darkness_at, wrap_words, Color, EntityPresentation, Palette, PlayfieldScene,
    Portrait, SlideScene, TitleScreen,
};
use glam::Vec2;
use macroquad::{
    shapes::{draw_circle, draw_rectangle},
    text::{draw_text_ex, measure_text, Font, TextParams},
    texture::{draw_texture_ex, DrawTextureParams, Texture2D},
};

use crate::{assets::Assets, to_macroquad_color};

const TITLE_FONT_SIZE: u16 = 74;
const PROMPT_FONT_SIZE: u16 = 36;
const BODY_FONT_SIZE: u16 = 24;
const HINT_STEP: f32 = 28.0;
const HINT_BOTTOM_OFFSET: f32 = 80.0;
const BACKDROP_SHADE: u8 = 128;

const STRIP_HEIGHT: f32 = 150.0;
const STRIP_BOTTOM_MARGIN: f32 = 50.0;
const STRIP_SHADE: u8 = 180;
const TEXT_MARGIN: f32 = 50.0;
const LINE_GAP: f32 = 10.0;
const PROMPT_MARGIN: f32 = 20.0;

const DARKNESS_SUBDIVISIONS: f32 = 4.0;

/// Shared state needed by the drawing routines of one frame.
pub(crate) struct Canvas<'a> {
    pub(crate) assets: &'a Assets,
    pub(crate) palette: Palette,
    pub(crate) size: Vec2,
}

impl Canvas<'_> {
    pub(crate) fn title_screen(&self, screen: &TitleScreen, shaded: bool) {
        self.backdrop(screen.backdrop, shaded);

        let (width, height) = (self.size.x, self.size.y);
        self.centered_text(
            &screen.title,
            Vec2::new(width / 2.0, height / 3.0),
            TITLE_FONT_SIZE,
            screen.title_color,
        );

        if let Some(prompt) = &screen.prompt {
            self.centered_text(
                prompt,
                Vec2::new(width / 2.0, height * 2.0 / 3.0),
                PROMPT_FONT_SIZE,
                Color::from_rgb_u8(200, 200, 200),
            );
        }

        let hint_color = Color::from_rgb_u8(180, 180, 180);
        for (index, hint) in screen.hints.iter().enumerate() {
            let y = height - HINT_BOTTOM_OFFSET + index as f32 * HINT_STEP;
            self.centered_text(hint, Vec2::new(width / 2.0, y), BODY_FONT_SIZE, hint_color);
        }
    }

    pub(crate) fn playfield(&self, scene: &PlayfieldScene) {
        let cell = scene.cell_size;

        for &coord in &scene.floors {
            self.tile(
                scene.cell_origin(coord),
                cell,
                self.assets.floor.loaded(),
                self.palette.floor,
            );
        }
        for &coord in &scene.walls {
            self.tile(
                scene.cell_origin(coord),
                cell,
                self.assets.wall.loaded(),
                self.palette.wall,
            );
        }

        let player = scene.cell_origin(scene.player.cell);
        let player_color = to_macroquad_color(self.palette.player);
        draw_rectangle(player.x, player.y, cell, cell, player_color);

        self.guide(scene, &scene.guide);
        self.darkness(scene);
    }

    pub(crate) fn slide(&self, slide: &SlideScene, backdrop: Option<Texture2D>) {
        if let Some(texture) = backdrop {
            self.draw_cropped(texture, None);
        }

        let (width, height) = (self.size.x, self.size.y);
        let top = height - STRIP_HEIGHT - STRIP_BOTTOM_MARGIN;

        if let Some(portrait) = &slide.portrait {
            self.portrait(portrait, top);
        }

        draw_rectangle(
            0.0,
            top,
            width,
            STRIP_HEIGHT,
            to_macroquad_color(Color::from_rgb_u8(0, 0, 0).with_alpha_u8(STRIP_SHADE)),
        );

        let white = Color::from_rgb_u8(255, 255, 255);
        self.text(
            &slide.speaker_label,
            Vec2::new(TEXT_MARGIN, top + 20.0 + f32::from(BODY_FONT_SIZE)),
            BODY_FONT_SIZE,
            white,
        );

        let font = self.font();
        let lines = wrap_words(&slide.text, width - 2.0 * TEXT_MARGIN, |candidate| {
            measure_text(candidate, font, BODY_FONT_SIZE, 1.0).width
        });
        let line_height = measure_text("Ag", font, BODY_FONT_SIZE, 1.0).height + LINE_GAP;
        for (index, line) in lines.iter().enumerate() {
            let baseline = top + 70.0 + index as f32 * line_height;
            self.text(
                line,
                Vec2::new(TEXT_MARGIN, baseline),
                BODY_FONT_SIZE,
                slide.text_color,
            );
        }

        let prompt_width = measure_text(&slide.prompt, font, BODY_FONT_SIZE, 1.0).width;
        self.text(
            &slide.prompt,
            Vec2::new(width - PROMPT_MARGIN - prompt_width, height - PROMPT_MARGIN),
            BODY_FONT_SIZE,
            white,
        );
    }

    fn backdrop(&self, key: firefly_rendering::BackdropKey, shaded: bool) {
        if let Some(texture) = self.assets.backdrop(key) {
            self.draw_cropped(texture, shaded.then_some(BACKDROP_SHADE));
        }
    }

    fn draw_cropped(&self, texture: Texture2D, shade: Option<u8>) {
        let crop = centered_crop(Vec2::new(texture.width(), texture.height()), self.size);
        draw_texture_ex(
            texture,
            crop.destination.x,
            crop.destination.y,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(macroquad::math::vec2(crop.size.x, crop.size.y)),
                source: Some(macroquad::math::Rect::new(
                    crop.source_origin.x,
                    crop.source_origin.y,
                    crop.size.x,
                    crop.size.y,
                )),
                ..Default::default()
            },
        );

        if let Some(alpha) = shade {
            draw_rectangle(
                0.0,
                0.0,
                self.size.x,
                self.size.y,
                to_macroquad_color(Color::from_rgb_u8(0, 0, 0).with_alpha_u8(alpha)),
            );
        }
    }

    fn tile(&self, origin: Vec2, size: f32, texture: Option<&Texture2D>, fallback: Color) {
        match texture {
            Some(texture) => draw_texture_ex(
                *texture,
                origin.x,
                origin.y,
                macroquad::color::WHITE,
                DrawTextureParams {
                    dest_size: Some(macroquad::math::vec2(size, size)),
                    ..Default::default()
                },
            ),
            None => draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(fallback)),
        }
    }

    fn guide(&self, scene: &PlayfieldScene, guide: &EntityPresentation) {
        let center = scene.cell_center(guide.cell);
        match self.assets.guide_frame(guide.frame) {
            Some(texture) => {
                let (width, height) = (texture.width(), texture.height());
                draw_texture_ex(
                    texture,
                    center.x - width / 2.0,
                    center.y - height / 2.0,
                    macroquad::color::WHITE,
                    DrawTextureParams {
                        flip_x: guide.facing.faces_left(),
                        ..Default::default()
                    },
                );
            }
            None => draw_circle(
                center.x,
                center.y,
                scene.cell_size / 4.0,
                to_macroquad_color(Color::from_rgb_u8(255, 240, 120)),
            ),
        }
    }

    fn darkness(&self, scene: &PlayfieldScene) {
        let step = (scene.cell_size / DARKNESS_SUBDIVISIONS).max(1.0);
        let black = Color::from_rgb_u8(0, 0, 0);

        let mut y = 0.0;
        while y < self.size.y {
            let mut x = 0.0;
            while x < self.size.x {
                let sample = Vec2::new(x + step / 2.0, y + step / 2.0);
                let alpha = darkness_at(sample, scene.darkness, &scene.lights);
                if alpha > 0 {
                    let shade = to_macroquad_color(black.with_alpha_u8(alpha));
                    draw_rectangle(x, y, step, step, shade);
                }
                x += step;
            }
            y += step;
        }
    }

    fn portrait(&self, portrait: &Portrait, top: f32) {
        let quarter = self.size.x / 4.0;
        let size = portrait.size;

        match portrait.speaker {
            Speaker::Player => {
                let center = Vec2::new(quarter, top - 100.0);
                let pulse = if portrait.frame % 2 == 0 { 0.0 } else { size * 0.04 };
                let side = size - pulse;
                draw_rectangle(
                    center.x - side / 2.0,
                    center.y - side / 2.0,
                    side,
                    side,
                    to_macroquad_color(self.palette.player),
                );
            }
            Speaker::Firefly => {
                let center = Vec2::new(quarter, top - 50.0);
                match self.assets.guide_frame(portrait.frame) {
                    Some(texture) => draw_texture_ex(
                        texture,
                        center.x - size / 2.0,
                        center.y - size / 2.0,
                        macroquad::color::WHITE,
                        DrawTextureParams {
                            dest_size: Some(macroquad::math::vec2(size, size)),
                            flip_x: portrait.mirrored,
                            ..Default::default()
                        },
                    ),
                    None => draw_circle(
                        center.x,
                        center.y,
                        size / 4.0,
                        to_macroquad_color(Color::from_rgb_u8(255, 240, 120)),
                    ),
                }
            }
        }
    }

    fn font(&self) -> Option<Font> {
        self.assets.font()
    }

    fn centered_text(&self, text: &str, center: Vec2, size: u16, color: Color) {
        let dimensions = measure_text(text, self.font(), size, 1.0);
        let x = center.x - dimensions.width / 2.0;
        let baseline = center.y - dimensions.height / 2.0 + dimensions.offset_y;
        self.text(text, Vec2::new(x, baseline), size, color);
    }

    fn text(&self, text: &str, baseline: Vec2, size: u16, color: Color) {
        draw_text_ex(
            text,
            baseline.x,
            baseline.y,
            TextParams {
                font: self.font().unwrap_or_default(),
                font_size: size,
                color: to_macroquad_color(color),
                ..Default::default()
            },
        );
    }
}
