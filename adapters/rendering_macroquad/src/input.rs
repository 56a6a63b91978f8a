//! Keyboard polling and its translation into frame input.

use firefly_core::DirectionalInput;
use firefly_rendering::FrameInput;
use macroquad::input::{is_key_down, is_key_pressed, is_quit_requested, KeyCode};

/// Keys observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    /// `Enter` pressed this frame.
    pub enter: bool,
    /// `Escape` pressed this frame.
    pub escape: bool,
    /// The window close button was used.
    pub close_requested: bool,
    /// `W` or the up arrow held.
    pub up: bool,
    /// `S` or the down arrow held.
    pub down: bool,
    /// `A` or the left arrow held.
    pub left: bool,
    /// `D` or the right arrow held.
    pub right: bool,
}

impl KeyboardSnapshot {
    pub(crate) fn poll() -> Self {
        let held = |primary: KeyCode, arrow: KeyCode| is_key_down(primary) || is_key_down(arrow);

        Self {
            enter: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            escape: is_key_pressed(KeyCode::Escape),
            close_requested: is_quit_requested(),
            up: held(KeyCode::W, KeyCode::Up),
            down: held(KeyCode::S, KeyCode::Down),
            left: held(KeyCode::A, KeyCode::Left),
            right: held(KeyCode::D, KeyCode::Right),
        }
    }

    /// Translates raw key state into the adapter-neutral frame input.
    #[must_use]
    pub fn frame_input(self) -> FrameInput {
        FrameInput {
            confirm: self.enter,
            cancel: self.escape,
            quit: self.close_requested,
            movement: DirectionalInput {
                up: self.up,
                down: self.down,
                left: self.left,
                right: self.right,
            },
        }
    }
}
