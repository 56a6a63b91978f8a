//! Keyboard-driven player entity.

use std::time::Duration;

use firefly_core::{CellCoord, Direction};

use crate::{AnimationClock, EntityPose, GridEntity, StepCadence, StepContext};

/// Number of animation frames cycled by the player.
pub const PLAYER_FRAME_COUNT: usize = 2;

/// Pacing parameters for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Minimum interval between grid steps.
    pub move_cadence: Duration,
    /// Interval between animation frames.
    pub animation_cadence: Duration,
}

/// Player-controlled entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    cell: CellCoord,
    facing: Direction,
    cadence: StepCadence,
    animation: AnimationClock,
}

impl Player {
    /// Spawns a player standing on `cell`, facing east.
    #[must_use]
    pub const fn new(cell: CellCoord, config: PlayerConfig) -> Self {
        Self {
            cell,
            facing: Direction::East,
            cadence: StepCadence::new(config.move_cadence),
            animation: AnimationClock::new(config.animation_cadence, PLAYER_FRAME_COUNT),
        }
    }

    /// Moves one cell in `direction` unless the destination is blocked.
    ///
    /// Returns whether the move happened. A blocked move leaves position and
    /// facing untouched.
    pub fn try_move(
        &mut self,
        direction: Direction,
        is_blocked: &dyn Fn(CellCoord) -> bool,
    ) -> bool {
        let candidate = self.cell.neighbor(direction);
        if is_blocked(candidate) {
            return false;
        }

        self.cell = candidate;
        self.facing = direction;
        true
    }

    /// Direction of the last successful move.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Step accumulator, exposed for inspection.
    #[must_use]
    pub const fn cadence(&self) -> &StepCadence {
        &self.cadence
    }
}

impl GridEntity for Player {
    fn cell(&self) -> CellCoord {
        self.cell
    }

    fn step(&mut self, dt: Duration, context: &StepContext<'_>) {
        self.animation.advance(dt);
        self.cadence.advance(dt);
        if !self.cadence.is_ready() {
            return;
        }

        // Only a successful move spends the cadence; a bump re-tests next update.
        let moved = context
            .input
            .resolve()
            .is_some_and(|direction| self.try_move(direction, context.is_blocked));
        if moved {
            self.cadence.consume();
        } else {
            self.cadence.hold();
        }
    }

    fn animate(&mut self, dt: Duration) {
        self.animation.advance(dt);
    }

    fn pose(&self) -> EntityPose {
        EntityPose {
            cell: self.cell,
            facing: self.facing,
            frame: self.animation.frame(),
        }
    }
}
