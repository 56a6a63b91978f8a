//! Backend-neutral text and image layout helpers.

use glam::Vec2;

/// Splits `text` into lines no wider than `max_width`.
///
/// `measure` returns the rendered width of a string. Words are never split; a
/// single word wider than the limit gets a line of its own.
#[must_use]
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Portion of an image copied to the screen and where it lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRegion {
    /// Top-left corner of the copied area inside the image.
    pub source_origin: Vec2,
    /// Size of the copied area.
    pub size: Vec2,
    /// Top-left corner of the copied area on screen.
    pub destination: Vec2,
}

/// Crops the middle of `image` to at most `screen` and centers it on screen.
#[must_use]
pub fn centered_crop(image: Vec2, screen: Vec2) -> CropRegion {
    let image = image.max(Vec2::ZERO);
    let screen = screen.max(Vec2::ZERO);
    let size = image.min(screen);
    let source_origin = ((image - size) * 0.5).floor();
    let destination = ((screen - size) * 0.5).floor();

    CropRegion {
        source_origin,
        size,
        destination,
    }
}
