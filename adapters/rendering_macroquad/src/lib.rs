#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Firefly.

mod assets;
mod audio;
mod draw;
mod input;
mod pacing;

use std::time::Duration;

use anyhow::Result;
use firefly_rendering::{BackdropKey, LoopControl, Presentation, RenderingBackend, Scene, SceneView};
use tracing::info;

pub use assets::{Asset, AssetPaths};
pub use input::KeyboardSnapshot;
pub use pacing::FramePacer;

use crate::{
    assets::{load_window_icon, Assets},
    audio::AudioPlayer,
    draw::Canvas,
};

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Debug)]
pub struct MacroquadBackend {
    show_fps: bool,
    frame_budget: Option<Duration>,
    asset_paths: Option<AssetPaths>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadBackend {
    /// Creates a backend without a frame cap that draws flat colors only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_fps: false,
            frame_budget: None,
            asset_paths: None,
        }
    }

    /// Enables or disables the once-per-second frame rate log line.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Caps the frame rate by sleeping away the rest of each `budget`.
    #[must_use]
    pub fn with_frame_budget(mut self, budget: Duration) -> Self {
        self.frame_budget = Some(budget);
        self
    }

    /// Loads textures, fonts and sounds from `paths` when the window opens.
    #[must_use]
    pub fn with_asset_paths(mut self, paths: AssetPaths) -> Self {
        self.asset_paths = Some(paths);
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, firefly_rendering::FrameInput, &mut Scene) -> LoopControl + 'static,
    {
        let Self {
            show_fps,
            frame_budget,
            asset_paths,
        } = self;

        let size = presentation.size();
        let Presentation {
            window_title,
            width,
            height,
            clear_color,
            palette,
            scene,
        } = presentation;

        let defaults = macroquad::window::Conf::default();
        let config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(width)?,
            window_height: i32::try_from(height)?,
            window_resizable: false,
            icon: asset_paths.as_ref().and_then(load_window_icon).or(defaults.icon),
            ..defaults
        };

        macroquad::Window::from_config(config, async move {
            macroquad::input::prevent_quit();

            let paths = asset_paths.unwrap_or_default();
            let assets = Assets::load(&paths);
            let mut audio = AudioPlayer::load(&paths).await;

            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let mut pacer = frame_budget.map(FramePacer::new);

            loop {
                let frame_input = KeyboardSnapshot::poll().frame_input();
                let seconds = macroquad::time::get_frame_time().max(0.0);
                let frame_dt = Duration::try_from_secs_f32(seconds).unwrap_or_default();

                let control = update_scene(frame_dt, frame_input, &mut scene);

                for request in scene.audio.drain(..) {
                    audio.apply(request);
                }

                macroquad::window::clear_background(background);
                let canvas = Canvas {
                    assets: &assets,
                    palette,
                    size,
                };
                draw_scene(&canvas, &scene);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        info!(fps = per_second, "frame_rate");
                    }
                }

                if control == LoopControl::Exit {
                    break;
                }

                if let Some(pacer) = pacer.as_mut() {
                    pacer.wait();
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(canvas: &Canvas<'_>, scene: &Scene) {
    match &scene.view {
        SceneView::Menu(screen) | SceneView::End(screen) => canvas.title_screen(screen, true),
        SceneView::Play(playfield) => canvas.playfield(playfield),
        SceneView::Slideshow(slide) => {
            canvas.slide(slide, canvas.assets.backdrop(BackdropKey::Final));
        }
    }
}

fn to_macroquad_color(color: firefly_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
