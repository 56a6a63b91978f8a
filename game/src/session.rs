//! Per-level play state and the portraits carried into the slideshow.

use std::time::Duration;

use firefly_core::{CellCoord, DirectionalInput};
use firefly_level::LevelGrid;
use firefly_system_motion::{GridEntity, Guide, Player, StepContext};
use tracing::warn;

use crate::GameConfig;

/// Level grid plus the two entities walking on it.
#[derive(Clone, Debug)]
pub(crate) struct Session {
    pub(crate) grid: LevelGrid,
    pub(crate) player: Player,
    pub(crate) guide: Guide,
}

impl Session {
    pub(crate) fn new(level: u32, grid: LevelGrid, config: &GameConfig) -> Self {
        if grid.guide_path().is_empty() {
            warn!(
                level,
                outcome = ?grid.trace().outcome(),
                "guide_path_untraceable"
            );
        }

        let player = Player::new(grid.player_spawn(), config.player);
        let path = grid.guide_path().to_vec();
        let guide = Guide::new(path, grid.player_spawn(), config.guide);
        Self {
            grid,
            player,
            guide,
        }
    }

    /// Runs one play update and reports whether the level is complete.
    pub(crate) fn update(&mut self, dt: Duration, input: DirectionalInput) -> bool {
        let grid = &self.grid;
        let is_blocked = |cell: CellCoord| grid.is_wall(cell);
        let context = StepContext {
            input,
            player_cell: self.player.cell(),
            is_blocked: &is_blocked,
        };

        self.guide.step(dt, &context);
        self.player.step(dt, &context);
        self.is_complete()
    }

    /// True once the player stands on the final cell of a non-empty path.
    fn is_complete(&self) -> bool {
        self.grid.guide_path().last() == Some(&self.player.cell())
    }
}

/// Closing narrative position and the portraits drawn beside it.
#[derive(Clone, Debug)]
pub(crate) struct Slideshow {
    pub(crate) index: usize,
    pub(crate) player: Player,
    pub(crate) guide: Guide,
}

impl Slideshow {
    pub(crate) fn from_session(session: Session) -> Self {
        Self {
            index: 0,
            player: session.player,
            guide: session.guide,
        }
    }

    pub(crate) fn animate(&mut self, dt: Duration) {
        self.player.animate(dt);
        self.guide.animate(dt);
    }
}
