//! Path-following guide entity.

use std::time::Duration;

use firefly_core::{CellCoord, Direction};

use crate::{AnimationClock, EntityPose, GridEntity, StepCadence, StepContext};

/// Number of animation frames cycled by the guide.
pub const GUIDE_FRAME_COUNT: usize = 3;

/// Pacing parameters for the guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideConfig {
    /// Interval between path steps.
    pub move_cadence: Duration,
    /// Interval between animation frames.
    pub animation_cadence: Duration,
}

/// Progress of the guide along its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuideState {
    /// The level has no traceable path; the guide never moves.
    Stationary,
    /// The guide is walking toward the final path cell.
    Travelling,
    /// The guide stands on the final path cell.
    Arrived,
}

/// Entity that replays the level's authored path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guide {
    path: Vec<CellCoord>,
    anchor: CellCoord,
    index: usize,
    state: GuideState,
    player_joined: bool,
    cadence: StepCadence,
    animation: AnimationClock,
}

impl Guide {
    /// Places a guide at the start of `path`.
    ///
    /// With an empty path the guide stays on `anchor` forever.
    #[must_use]
    pub fn new(path: Vec<CellCoord>, anchor: CellCoord, config: GuideConfig) -> Self {
        let state = match path.len() {
            0 => GuideState::Stationary,
            1 => GuideState::Arrived,
            _ => GuideState::Travelling,
        };

        Self {
            path,
            anchor,
            index: 0,
            state,
            player_joined: false,
            cadence: StepCadence::new(config.move_cadence),
            animation: AnimationClock::new(config.animation_cadence, GUIDE_FRAME_COUNT),
        }
    }

    /// Path the guide follows.
    #[must_use]
    pub fn path(&self) -> &[CellCoord] {
        &self.path
    }

    /// Final path cell, if the guide has a path.
    #[must_use]
    pub fn destination(&self) -> Option<CellCoord> {
        self.path.last().copied()
    }

    /// Index of the current cell within the path.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current progress state.
    #[must_use]
    pub const fn state(&self) -> GuideState {
        self.state
    }

    /// Reports whether the player reached the guide after it arrived.
    #[must_use]
    pub const fn has_player_joined(&self) -> bool {
        self.player_joined
    }

    fn facing(&self) -> Direction {
        let Some(previous) = self.index.checked_sub(1).and_then(|index| self.path.get(index)) else {
            return Direction::East;
        };

        match previous.displacement_to(self.cell()) {
            (0, rows) if rows < 0 => Direction::North,
            (0, _) => Direction::South,
            (columns, _) if columns < 0 => Direction::West,
            _ => Direction::East,
        }
    }
}

impl GridEntity for Guide {
    fn cell(&self) -> CellCoord {
        self.path.get(self.index).copied().unwrap_or(self.anchor)
    }

    fn step(&mut self, dt: Duration, context: &StepContext<'_>) {
        match self.state {
            GuideState::Stationary => {}
            GuideState::Arrived => {
                if self.destination() == Some(context.player_cell) {
                    self.player_joined = true;
                }
            }
            GuideState::Travelling => {
                self.animation.advance(dt);
                self.cadence.advance(dt);
                if !self.cadence.is_ready() {
                    return;
                }

                self.cadence.consume();
                self.index += 1;
                if self.index + 1 >= self.path.len() {
                    self.state = GuideState::Arrived;
                }
            }
        }
    }

    fn animate(&mut self, dt: Duration) {
        self.animation.advance(dt);
    }

    fn pose(&self) -> EntityPose {
        EntityPose {
            cell: self.cell(),
            facing: self.facing(),
            frame: self.animation.frame(),
        }
    }
}
