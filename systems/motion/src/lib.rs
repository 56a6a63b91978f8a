#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic discrete-step motion shared by the player and the guide.
//!
//! Entities live on integer grid cells. Each one owns a [`StepCadence`] that
//! accumulates elapsed time and releases at most one grid step per update, so
//! tests can drive movement with synthetic durations instead of a real clock.
//! Animation timers are kept separately in an [`AnimationClock`] and never
//! influence where an entity stands.

mod guide;
mod player;

use std::time::Duration;

use firefly_core::{CellCoord, Direction, DirectionalInput};

pub use guide::{Guide, GuideConfig, GuideState, GUIDE_FRAME_COUNT};
pub use player::{Player, PlayerConfig, PLAYER_FRAME_COUNT};

/// Time accumulator that gates discrete grid steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepCadence {
    cadence: Duration,
    accumulated: Duration,
}

impl StepCadence {
    /// Creates an empty accumulator that releases a step every `cadence`.
    #[must_use]
    pub const fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            accumulated: Duration::ZERO,
        }
    }

    /// Adds elapsed time to the accumulator.
    pub fn advance(&mut self, dt: Duration) {
        self.accumulated = self.accumulated.saturating_add(dt);
    }

    /// Reports whether enough time accumulated to attempt a step.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.accumulated >= self.cadence
    }

    /// Spends one cadence worth of time, keeping any fractional overflow.
    pub fn consume(&mut self) {
        self.accumulated = self.accumulated.saturating_sub(self.cadence);
    }

    /// Caps the accumulator at a single cadence.
    ///
    /// Used when a ready step was not taken, so idle time never turns into a
    /// burst of steps later.
    pub fn hold(&mut self) {
        self.accumulated = self.accumulated.min(self.cadence);
    }

    /// Minimum interval between steps.
    #[must_use]
    pub const fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Time accumulated toward the next step.
    #[must_use]
    pub const fn accumulated(&self) -> Duration {
        self.accumulated
    }
}

/// Presentation-only frame counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClock {
    cadence: Duration,
    accumulated: Duration,
    frame: usize,
    frame_count: usize,
}

impl AnimationClock {
    /// Creates a clock cycling through `frame_count` frames every `cadence`.
    #[must_use]
    pub const fn new(cadence: Duration, frame_count: usize) -> Self {
        Self {
            cadence,
            accumulated: Duration::ZERO,
            frame: 0,
            frame_count,
        }
    }

    /// Advances the clock by at most one frame.
    pub fn advance(&mut self, dt: Duration) {
        if self.frame_count <= 1 {
            return;
        }

        self.accumulated = self.accumulated.saturating_add(dt);
        if self.accumulated >= self.cadence {
            self.accumulated = self.accumulated.saturating_sub(self.cadence);
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    /// Index of the frame currently displayed.
    #[must_use]
    pub const fn frame(&self) -> usize {
        self.frame
    }
}

/// Everything a renderer needs to draw an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityPose {
    /// Cell the entity occupies.
    pub cell: CellCoord,
    /// Direction of the entity's last movement.
    pub facing: Direction,
    /// Animation frame to display.
    pub frame: usize,
}

/// Per-update inputs shared by every grid entity.
pub struct StepContext<'a> {
    /// Movement keys held this frame.
    pub input: DirectionalInput,
    /// Player cell before this update's moves.
    pub player_cell: CellCoord,
    /// Reports whether a cell blocks movement.
    pub is_blocked: &'a dyn Fn(CellCoord) -> bool,
}

/// Capability shared by every entity that steps across the grid.
pub trait GridEntity {
    /// Cell the entity currently occupies.
    fn cell(&self) -> CellCoord;

    /// Advances timers by `dt` and takes at most one grid step.
    fn step(&mut self, dt: Duration, context: &StepContext<'_>);

    /// Advances animation timers only, leaving the position untouched.
    fn animate(&mut self, dt: Duration);

    /// Snapshot used for drawing.
    fn pose(&self) -> EntityPose;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_consume_keeps_fractional_overflow() {
        let mut cadence = StepCadence::new(Duration::from_millis(100));
        cadence.advance(Duration::from_millis(130));
        assert!(cadence.is_ready());

        cadence.consume();
        assert_eq!(cadence.accumulated(), Duration::from_millis(30));
        assert!(!cadence.is_ready());
    }

    #[test]
    fn cadence_hold_caps_banked_time() {
        let mut cadence = StepCadence::new(Duration::from_millis(100));
        cadence.advance(Duration::from_secs(5));
        cadence.hold();
        assert_eq!(cadence.accumulated(), Duration::from_millis(100));
        assert!(cadence.is_ready());
    }

    #[test]
    fn zero_cadence_is_always_ready() {
        let cadence = StepCadence::new(Duration::ZERO);
        assert!(cadence.is_ready());
    }

    #[test]
    fn animation_clock_wraps_frames() {
        let mut clock = AnimationClock::new(Duration::from_millis(10), 3);
        for expected in [1, 2, 0, 1] {
            clock.advance(Duration::from_millis(10));
            assert_eq!(clock.frame(), expected);
        }
    }

    #[test]
    fn single_frame_clock_never_moves() {
        let mut clock = AnimationClock::new(Duration::ZERO, 1);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.frame(), 0);
    }
}
