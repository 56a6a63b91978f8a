//! Frame-rate cap.

use std::{
    thread,
    time::{Duration, Instant},
};

/// Sleeps away whatever is left of each frame's time budget.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Instant,
}

impl FramePacer {
    /// Creates a pacer that starts timing immediately.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            frame_start: Instant::now(),
        }
    }

    /// Time left in the budget after `elapsed` was spent.
    #[must_use]
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Blocks until the current frame's budget is spent and starts the next one.
    pub fn wait(&mut self) {
        let remaining = self.remaining(self.frame_start.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}
