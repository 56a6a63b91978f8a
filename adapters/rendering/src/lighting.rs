//! Darkness overlay with subtractive radial lights.

use glam::Vec2;

/// Darkness alpha applied where no light reaches.
pub const BASE_DARKNESS: u8 = 250;

const PLAYER_RADIUS_CELLS: f32 = 1.5;
const PLAYER_STRENGTH: u8 = 210;
const GUIDE_RADIUS_CELLS: f32 = 3.5;
const GUIDE_STRENGTH: u8 = 180;

/// Radial light that fades linearly from its center to its radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightMask {
    /// Center of the light in pixels.
    pub center: Vec2,
    /// Distance at which the light fades out completely.
    pub radius: f32,
    /// Alpha removed from the darkness at the center.
    pub strength: u8,
}

impl LightMask {
    /// Creates a new light.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, strength: u8) -> Self {
        Self {
            center,
            radius,
            strength,
        }
    }

    /// Small light carried by the player.
    #[must_use]
    pub fn player(center: Vec2, cell_size: f32) -> Self {
        Self::new(center, cell_size * PLAYER_RADIUS_CELLS, PLAYER_STRENGTH)
    }

    /// Wide glow emitted by the guide.
    #[must_use]
    pub fn guide(center: Vec2, cell_size: f32) -> Self {
        Self::new(center, cell_size * GUIDE_RADIUS_CELLS, GUIDE_STRENGTH)
    }

    /// Alpha removed from the darkness at `distance` from the center.
    #[must_use]
    pub fn alpha_at(&self, distance: f32) -> u8 {
        if self.radius <= f32::EPSILON || distance >= self.radius {
            return 0;
        }

        let falloff = 1.0 - distance.max(0.0) / self.radius;
        (f32::from(self.strength) * falloff).round() as u8
    }
}

/// Darkness alpha left at `point` once every light has been subtracted.
#[must_use]
pub fn darkness_at(point: Vec2, base: u8, lights: &[LightMask]) -> u8 {
    lights.iter().fold(base, |alpha, light| {
        alpha.saturating_sub(light.alpha_at(light.center.distance(point)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_is_strongest_at_center_and_gone_at_radius() {
        let light = LightMask::player(Vec2::ZERO, 32.0);

        assert_eq!(light.radius, 48.0);
        assert_eq!(light.alpha_at(0.0), 210);
        assert_eq!(light.alpha_at(24.0), 105);
        assert_eq!(light.alpha_at(48.0), 0);
        assert_eq!(light.alpha_at(100.0), 0);
    }

    #[test]
    fn guide_light_is_wider_and_softer() {
        let light = LightMask::guide(Vec2::ZERO, 32.0);

        assert_eq!(light.radius, 112.0);
        assert_eq!(light.alpha_at(0.0), 180);
    }

    #[test]
    fn zero_radius_light_emits_nothing() {
        let light = LightMask::new(Vec2::ZERO, 0.0, 255);
        assert_eq!(light.alpha_at(0.0), 0);
    }

    #[test]
    fn overlapping_lights_saturate_at_full_brightness() {
        let point = Vec2::new(10.0, 10.0);
        let lights = [
            LightMask::player(point, 32.0),
            LightMask::guide(point, 32.0),
        ];

        assert_eq!(darkness_at(point, BASE_DARKNESS, &lights), 0);
    }

    #[test]
    fn unlit_points_keep_base_darkness() {
        let lights = [LightMask::player(Vec2::ZERO, 32.0)];
        assert_eq!(
            darkness_at(Vec2::new(500.0, 500.0), BASE_DARKNESS, &lights),
            BASE_DARKNESS
        );
    }

    #[test]
    fn single_light_thins_darkness_near_center() {
        let lights = [LightMask::player(Vec2::ZERO, 32.0)];
        assert_eq!(darkness_at(Vec2::ZERO, BASE_DARKNESS, &lights), 40);
    }
}
