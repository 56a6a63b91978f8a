#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Firefly adapters.
//!
//! Backends receive a [`Presentation`] once and a [`Scene`] every frame. The
//! scene is a plain description of what to draw and which sounds to start or
//! stop; it never borrows from the game, so backends stay free of simulation
//! types.

pub mod compose;
pub mod layout;
pub mod lighting;

use anyhow::Result as AnyResult;
use firefly_core::{AudioCue, CellCoord, Direction, DirectionalInput, Rgb, Speaker};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

pub use compose::{audio_requests, compose_scene, SceneStyle};
pub use layout::{centered_crop, wrap_words, CropRegion};
pub use lighting::{darkness_at, LightMask, BASE_DARKNESS};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the alpha channel replaced by a byte value.
    #[must_use]
    pub fn with_alpha_u8(self, alpha: u8) -> Self {
        Self {
            alpha: f32::from(alpha) / 255.0,
            ..self
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Confirm key pressed this frame.
    pub confirm: bool,
    /// Cancel key pressed this frame.
    pub cancel: bool,
    /// The window asked to close.
    pub quit: bool,
    /// Movement keys held this frame.
    pub movement: DirectionalInput,
}

/// Tells the backend whether to keep its frame loop running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopControl {
    /// Render the scene and continue with the next frame.
    Continue,
    /// Leave the frame loop after this frame.
    Exit,
}

/// Sound request drained from the scene by backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioRequest {
    /// Start playing a theme.
    Play {
        /// Theme to start.
        cue: AudioCue,
        /// Whether the theme repeats until stopped.
        looped: bool,
    },
    /// Stop a theme.
    Stop {
        /// Theme to stop.
        cue: AudioCue,
    },
}

/// Full-screen image drawn behind title screens and slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackdropKey {
    /// Title screen image.
    Menu,
    /// Closing screen image.
    End,
    /// Image behind the closing narrative.
    Final,
}

/// Title, prompt and hints shown on the menu and end screens.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleScreen {
    /// Large heading text.
    pub title: String,
    /// Color of the heading.
    pub title_color: Color,
    /// Call to action drawn below the heading.
    pub prompt: Option<String>,
    /// Small hint lines drawn near the bottom of the screen.
    pub hints: Vec<String>,
    /// Image drawn behind the text.
    pub backdrop: BackdropKey,
}

/// Entity drawn on the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityPresentation {
    /// Cell occupied by the entity.
    pub cell: CellCoord,
    /// Direction of the entity's last movement.
    pub facing: Direction,
    /// Animation frame to display.
    pub frame: usize,
}

/// Level geometry, entities and lighting for one play frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayfieldScene {
    /// Side length of a single cell in pixels.
    pub cell_size: f32,
    /// Cells drawn as walls.
    pub walls: Vec<CellCoord>,
    /// Cells drawn as floor.
    pub floors: Vec<CellCoord>,
    /// Player-controlled entity.
    pub player: EntityPresentation,
    /// Path-following guide.
    pub guide: EntityPresentation,
    /// Darkness alpha applied outside every light.
    pub darkness: u8,
    /// Lights subtracted from the darkness overlay.
    pub lights: Vec<LightMask>,
}

impl PlayfieldScene {
    /// Top-left pixel of a cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_size
    }

    /// Pixel at the center of a cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_size * 0.5)
    }
}

/// Character artwork drawn above the slide text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Portrait {
    /// Character shown.
    pub speaker: Speaker,
    /// Animation frame of the character.
    pub frame: usize,
    /// Whether the artwork is flipped horizontally.
    pub mirrored: bool,
    /// Side length of the portrait in pixels.
    pub size: f32,
}

/// One page of the closing narrative.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideScene {
    /// Label naming the speaker.
    pub speaker_label: String,
    /// Dialogue line, wrapped by the backend.
    pub text: String,
    /// Color of the dialogue line.
    pub text_color: Color,
    /// Prompt drawn in the bottom-right corner.
    pub prompt: String,
    /// Artwork of the speaker, when available.
    pub portrait: Option<Portrait>,
}

/// Screen content for the active game state.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneView {
    /// Title screen.
    Menu(TitleScreen),
    /// A level being played.
    Play(PlayfieldScene),
    /// Closing narrative.
    Slideshow(SlideScene),
    /// Closing screen.
    End(TitleScreen),
}

/// Scene description combining what to draw with pending sound requests.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Screen content.
    pub view: SceneView,
    /// Sound requests the backend drains after the update.
    pub audio: Vec<AudioRequest>,
}

impl Scene {
    /// Creates a new scene without pending sound requests.
    #[must_use]
    pub fn new(view: SceneView) -> Self {
        Self {
            view,
            audio: Vec::new(),
        }
    }
}

/// Flat colors used when textures are missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Wall fill.
    pub wall: Color,
    /// Floor fill.
    pub floor: Color,
    /// Player fill.
    pub player: Color,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Fallback colors for level geometry and the player.
    pub palette: Palette,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    ///
    /// Returns an error when either window dimension is zero.
    pub fn new<T>(
        window_title: T,
        width: u32,
        height: u32,
        clear_color: Color,
        palette: Palette,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if width == 0 || height == 0 {
            return Err(RenderingError::EmptyWindow { width, height });
        }

        Ok(Self {
            window_title: window_title.into(),
            width,
            height,
            clear_color,
            palette,
            scene,
        })
    }

    /// Window size in pixels.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Rendering backend capable of presenting Firefly scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the measured frame delta and
    /// the input captured by the adapter, may replace the scene before it is
    /// rendered, and decides whether the loop continues.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Windows must have a visible area.
    EmptyWindow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow { width, height } => {
                write!(
                    f,
                    "window must have a visible area (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette {
            wall: Color::from_rgb_u8(70, 70, 90),
            floor: Color::from_rgb_u8(30, 30, 40),
            player: Color::from_rgb_u8(255, 255, 150),
        }
    }

    fn end_scene() -> Scene {
        Scene::new(SceneView::End(TitleScreen {
            title: "The End".to_owned(),
            title_color: Color::from_rgb_u8(255, 255, 255),
            prompt: None,
            hints: Vec::new(),
            backdrop: BackdropKey::End,
        }))
    }

    #[test]
    fn presentation_rejects_empty_window_without_panicking() {
        let error = Presentation::new(
            "Firefly",
            0,
            600,
            Color::from_rgb_u8(0, 0, 0),
            palette(),
            end_scene(),
        )
        .expect_err("zero width must be rejected");

        assert_eq!(
            error,
            RenderingError::EmptyWindow {
                width: 0,
                height: 600
            }
        );
        assert_eq!(
            error.to_string(),
            "window must have a visible area (received 0x600)"
        );
    }

    #[test]
    fn presentation_reports_window_size() {
        let presentation = Presentation::new(
            "Firefly",
            800,
            600,
            Color::from_rgb_u8(0, 0, 0),
            palette(),
            end_scene(),
        )
        .expect("valid window");

        assert_eq!(presentation.size(), Vec2::new(800.0, 600.0));
        assert!(presentation.scene.audio.is_empty());
    }

    #[test]
    fn rgb_converts_to_opaque_color() {
        let color = Color::from(Rgb::new(255, 0, 51));

        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 1.0));
        assert_eq!(color.with_alpha_u8(0).alpha, 0.0);
    }

    #[test]
    fn playfield_maps_cells_to_pixels() {
        let entity = EntityPresentation {
            cell: CellCoord::new(0, 0),
            facing: Direction::East,
            frame: 0,
        };
        let playfield = PlayfieldScene {
            cell_size: 32.0,
            walls: Vec::new(),
            floors: Vec::new(),
            player: entity,
            guide: entity,
            darkness: BASE_DARKNESS,
            lights: Vec::new(),
        };

        let cell = CellCoord::new(2, 1);
        assert_eq!(playfield.cell_origin(cell), Vec2::new(64.0, 32.0));
        assert_eq!(playfield.cell_center(cell), Vec2::new(80.0, 48.0));
    }
}
