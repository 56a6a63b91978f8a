//! Texture and font loading with flat-color fallbacks.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use firefly_core::AudioCue;
use firefly_rendering::BackdropKey;
use firefly_settings::Settings;
use image::imageops::{self, FilterType};
use macroquad::{
    miniquad::conf::Icon,
    text::{load_ttf_font_from_bytes, Font},
    texture::{FilterMode, Texture2D},
};
use tracing::{debug, warn};

const FONT_FILE: &str = "ZenMasters.ttf";
const GUIDE_FRAME_FILES: [&str; 3] = ["firefly_0.png", "firefly_1.png", "firefly_2.png"];

/// Result of an asset load that never aborts the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset<T> {
    /// The asset was read and decoded.
    Loaded(T),
    /// The asset is unavailable; callers draw or play a default instead.
    Fallback,
}

impl<T> Asset<T> {
    /// Wraps a load result, logging failures.
    pub fn from_result(result: Result<T>, kind: &'static str, path: &Path) -> Self {
        match result {
            Ok(value) => {
                debug!(asset = kind, path = %path.display(), "asset_loaded");
                Self::Loaded(value)
            }
            Err(error) => {
                warn!(
                    asset = kind,
                    path = %path.display(),
                    error = %format!("{error:#}"),
                    "asset_fallback"
                );
                Self::Fallback
            }
        }
    }

    /// Borrow of the loaded value, if any.
    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Fallback => None,
        }
    }
}

/// Filesystem locations of every asset the backend may load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetPaths {
    /// Directory holding tile, sprite and backdrop images.
    pub images: PathBuf,
    /// Image behind the closing narrative.
    pub final_image: PathBuf,
    /// Font used for every text element.
    pub font: PathBuf,
    /// Directory holding the themes.
    pub sounds: PathBuf,
}

impl AssetPaths {
    /// Resolves asset locations from the settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            images: settings.paths.images.clone(),
            final_image: settings.final_image_path(),
            font: settings.font_path(FONT_FILE),
            sounds: settings.paths.sounds.clone(),
        }
    }

    /// Location of an image inside the image directory.
    #[must_use]
    pub fn image(&self, file_name: &str) -> PathBuf {
        self.images.join(file_name)
    }

    /// Location of the backdrop image for `key`.
    #[must_use]
    pub fn backdrop(&self, key: BackdropKey) -> PathBuf {
        match key {
            BackdropKey::Menu => self.image("menu.png"),
            BackdropKey::End => self.image("end.png"),
            BackdropKey::Final => self.final_image.clone(),
        }
    }

    /// Location of the sound backing `cue`.
    #[must_use]
    pub fn sound(&self, cue: AudioCue) -> PathBuf {
        self.sounds.join(cue.file_name())
    }
}

/// Every texture and font drawn by the backend.
pub(crate) struct Assets {
    pub(crate) wall: Asset<Texture2D>,
    pub(crate) floor: Asset<Texture2D>,
    pub(crate) guide_frames: Vec<Asset<Texture2D>>,
    menu: Asset<Texture2D>,
    end: Asset<Texture2D>,
    final_image: Asset<Texture2D>,
    font: Asset<Font>,
}

impl Assets {
    /// Loads every asset. Requires an active graphics context.
    pub(crate) fn load(paths: &AssetPaths) -> Self {
        let texture = |path: PathBuf| Asset::from_result(load_texture(&path), "texture", &path);

        let font_path = paths.font.clone();
        Self {
            wall: texture(paths.image("wall.png")),
            floor: texture(paths.image("floor.png")),
            guide_frames: GUIDE_FRAME_FILES
                .iter()
                .map(|file| texture(paths.image(file)))
                .collect(),
            menu: texture(paths.backdrop(BackdropKey::Menu)),
            end: texture(paths.backdrop(BackdropKey::End)),
            final_image: texture(paths.backdrop(BackdropKey::Final)),
            font: Asset::from_result(load_font(&font_path), "font", &font_path),
        }
    }

    pub(crate) fn backdrop(&self, key: BackdropKey) -> Option<Texture2D> {
        let asset = match key {
            BackdropKey::Menu => &self.menu,
            BackdropKey::End => &self.end,
            BackdropKey::Final => &self.final_image,
        };
        asset.loaded().copied()
    }

    pub(crate) fn guide_frame(&self, frame: usize) -> Option<Texture2D> {
        if self.guide_frames.is_empty() {
            return None;
        }

        self.guide_frames[frame % self.guide_frames.len()]
            .loaded()
            .copied()
    }

    pub(crate) fn font(&self) -> Option<Font> {
        self.font.loaded().cloned()
    }
}

/// Decodes PNG bytes into an RGBA image.
pub(crate) fn decode_image(bytes: &[u8]) -> Result<image::RgbaImage> {
    let decoded = image::load_from_memory(bytes).context("failed to decode image")?;
    Ok(decoded.to_rgba8())
}

/// Window icon cut from the first guide frame; `None` keeps the platform default.
pub(crate) fn load_window_icon(paths: &AssetPaths) -> Option<Icon> {
    let path = paths.image(GUIDE_FRAME_FILES[0]);
    match Asset::from_result(read_window_icon(&path), "icon", &path) {
        Asset::Loaded(icon) => Some(icon),
        Asset::Fallback => None,
    }
}

fn read_window_icon(path: &Path) -> Result<Icon> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read icon at {}", path.display()))?;
    window_icon(&decode_image(&bytes)?)
}

fn window_icon(image: &image::RgbaImage) -> Result<Icon> {
    Ok(Icon {
        small: icon_pixels(image, 16)?,
        medium: icon_pixels(image, 32)?,
        big: icon_pixels(image, 64)?,
    })
}

fn icon_pixels<const N: usize>(image: &image::RgbaImage, side: u32) -> Result<[u8; N]> {
    let resized = imageops::resize(image, side, side, FilterType::Nearest);
    <[u8; N]>::try_from(resized.into_raw())
        .map_err(|pixels| anyhow!("icon has {} bytes, expected {N}", pixels.len()))
}

fn load_texture(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read image at {}", path.display()))?;
    let image = decode_image(&bytes)?;
    let width = u16::try_from(image.width()).context("image is too wide for a texture")?;
    let height = u16::try_from(image.height()).context("image is too tall for a texture")?;

    let texture = Texture2D::from_rgba8(width, height, image.as_raw());
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

fn load_font(path: &Path) -> Result<Font> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read font at {}", path.display()))?;
    load_ttf_font_from_bytes(&bytes).map_err(|error| anyhow!("failed to parse font: {error:?}"))
}
