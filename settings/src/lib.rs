#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only game settings loaded once at startup.
//!
//! Settings are authored as TOML. Every key is optional; absent keys fall back
//! to the defaults documented on each field. The loaded value is validated once
//! and then shared immutably by the game and the adapters.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use firefly_core::{AudioCue, Rgb, Slide, Speaker};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings from {path}")]
    Read {
        /// Location of the settings file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The settings file is not valid TOML or has mistyped values.
    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),
    /// A value parsed correctly but is outside its permitted range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Human readable description of the constraint.
        reason: String,
    },
}

/// Complete settings tree.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Window and grid geometry.
    pub graphics: Graphics,
    /// Flat colors used when textures are unavailable.
    pub colors: Colors,
    /// Campaign and player pacing.
    pub game: GameRules,
    /// Guide pacing.
    pub firefly: FireflyPacing,
    /// Player animation pacing.
    pub player: PlayerPacing,
    /// Asset and level locations.
    pub paths: Paths,
    /// Closing narrative; an empty list skips the slideshow.
    pub slides: Vec<Slide>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphics: Graphics::default(),
            colors: Colors::default(),
            game: GameRules::default(),
            firefly: FireflyPacing::default(),
            player: PlayerPacing::default(),
            paths: Paths::default(),
            slides: default_slides(),
        }
    }
}

/// Window and grid geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Graphics {
    /// Window width in pixels. Defaults to 800.
    pub screen_width: u32,
    /// Window height in pixels. Defaults to 600.
    pub screen_height: u32,
    /// Side length of one grid cell in pixels. Defaults to 32.
    pub cell_size: u32,
    /// Frame-rate cap. Defaults to 60.
    pub fps: u32,
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            cell_size: 32,
            fps: 60,
        }
    }
}

/// Flat colors used for the clear color and texture fallbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    /// Clear color. Defaults to black.
    pub background: Rgb,
    /// Wall color when the wall texture is missing.
    pub wall: Rgb,
    /// Floor color when the floor texture is missing.
    pub floor: Rgb,
    /// Player body color.
    pub player: Rgb,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: Rgb::new(0, 0, 0),
            wall: Rgb::new(70, 70, 90),
            floor: Rgb::new(30, 30, 40),
            player: Rgb::new(255, 255, 150),
        }
    }
}

/// Campaign layout and player pacing.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameRules {
    /// Minimum seconds between player steps. Defaults to 0.15.
    pub move_cooldown: f32,
    /// Level entered from the menu on the first confirm. Defaults to 1.
    pub initial_level: u32,
    /// Number of the final level. Defaults to 3.
    pub total_levels: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            move_cooldown: 0.15,
            initial_level: 1,
            total_levels: 3,
        }
    }
}

/// Guide pacing.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FireflyPacing {
    /// Seconds between animation frames. Defaults to 0.15.
    pub animation_delay: f32,
    /// Seconds between path steps. Defaults to 0.35.
    pub move_delay: f32,
}

impl Default for FireflyPacing {
    fn default() -> Self {
        Self {
            animation_delay: 0.15,
            move_delay: 0.35,
        }
    }
}

/// Player animation pacing.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerPacing {
    /// Seconds between animation frames. Defaults to 0.5.
    pub animation_delay: f32,
}

impl Default for PlayerPacing {
    fn default() -> Self {
        Self {
            animation_delay: 0.5,
        }
    }
}

/// Locations of assets and level files.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Paths {
    /// Image directory. Defaults to `assets/images`.
    pub images: PathBuf,
    /// Sound directory. Defaults to `assets/sounds`.
    pub sounds: PathBuf,
    /// Level directory holding `level{N}.txt`. Defaults to `levels`.
    pub levels: PathBuf,
    /// Font directory. Defaults to `assets/fonts`.
    pub fonts: PathBuf,
    /// Slideshow background inside the image directory. Defaults to `final.png`.
    pub final_image: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            images: PathBuf::from("assets/images"),
            sounds: PathBuf::from("assets/sounds"),
            levels: PathBuf::from("levels"),
            fonts: PathBuf::from("assets/fonts"),
            final_image: String::from("final.png"),
        }
    }
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads settings from `path`, falling back to defaults when the file is absent.
    ///
    /// Any other failure is returned unchanged.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match Self::load(path.as_ref()) {
            Err(SettingsError::Read { path, source })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                warn!(path = %path.display(), "settings_missing_using_defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Checks every range constraint.
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("graphics.screen_width", self.graphics.screen_width)?;
        positive("graphics.screen_height", self.graphics.screen_height)?;
        positive("graphics.cell_size", self.graphics.cell_size)?;
        positive("graphics.fps", self.graphics.fps)?;
        cadence("game.move_cooldown", self.game.move_cooldown)?;
        cadence("firefly.animation_delay", self.firefly.animation_delay)?;
        cadence("firefly.move_delay", self.firefly.move_delay)?;
        cadence("player.animation_delay", self.player.animation_delay)?;

        if self.game.initial_level == 0 {
            return Err(SettingsError::Invalid {
                field: "game.initial_level",
                reason: String::from("levels are numbered from 1"),
            });
        }
        if self.game.initial_level > self.game.total_levels {
            return Err(SettingsError::Invalid {
                field: "game.initial_level",
                reason: format!(
                    "initial level {} exceeds total_levels {}",
                    self.game.initial_level, self.game.total_levels
                ),
            });
        }
        Ok(())
    }

    /// Minimum interval between player steps.
    #[must_use]
    pub fn player_move_cadence(&self) -> Duration {
        seconds(self.game.move_cooldown)
    }

    /// Interval between player animation frames.
    #[must_use]
    pub fn player_animation_cadence(&self) -> Duration {
        seconds(self.player.animation_delay)
    }

    /// Interval between guide path steps.
    #[must_use]
    pub fn guide_move_cadence(&self) -> Duration {
        seconds(self.firefly.move_delay)
    }

    /// Interval between guide animation frames.
    #[must_use]
    pub fn guide_animation_cadence(&self) -> Duration {
        seconds(self.firefly.animation_delay)
    }

    /// Target duration of a single frame derived from the fps cap.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.graphics.fps.max(1)
    }

    /// Location of an image inside the image directory.
    #[must_use]
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.paths.images.join(file_name)
    }

    /// Location of the sound backing `cue`.
    #[must_use]
    pub fn sound_path(&self, cue: AudioCue) -> PathBuf {
        self.paths.sounds.join(cue.file_name())
    }

    /// Location of the slideshow background.
    #[must_use]
    pub fn final_image_path(&self) -> PathBuf {
        self.image_path(&self.paths.final_image)
    }

    /// Location of a font, preferring the font directory over the image directory.
    #[must_use]
    pub fn font_path(&self, file_name: &str) -> PathBuf {
        let preferred = self.paths.fonts.join(file_name);
        if preferred.exists() {
            preferred
        } else {
            self.image_path(file_name)
        }
    }
}

fn positive(field: &'static str, value: u32) -> Result<(), SettingsError> {
    if value == 0 {
        return Err(SettingsError::Invalid {
            field,
            reason: String::from("must be greater than zero"),
        });
    }
    Ok(())
}

fn cadence(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if Duration::try_from_secs_f32(value).is_err() {
        return Err(SettingsError::Invalid {
            field,
            reason: format!("{value} is not a finite, non-negative number of seconds"),
        });
    }
    Ok(())
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

fn default_slides() -> Vec<Slide> {
    let white = Rgb::new(255, 255, 255);
    vec![
        Slide::new(Speaker::Firefly, "*shining*", white),
        Slide::new(
            Speaker::Player,
            "What's there? I think I see a light. Is this the way out?",
            white,
        ),
        Slide::new(Speaker::Firefly, "* Opens the door carefully *", white),
        Slide::new(
            Speaker::Firefly,
            "Go to the light and don't touch the doors.",
            white,
        ),
        Slide::new(
            Speaker::Player,
            "You are my light.",
            Rgb::new(255, 255, 150),
        ),
    ]
}
