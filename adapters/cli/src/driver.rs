//! Per-frame bridge between the backend and the game state machine.

use std::time::Duration;

use firefly_core::{Command, Event};
use firefly_game::{apply, query, Game};
use firefly_rendering::{audio_requests, compose_scene, FrameInput, LoopControl, Scene, SceneStyle};
use tracing::error;

/// Feeds frame input to the game and refreshes the scene it presents.
pub(crate) struct Driver {
    game: Game,
    style: SceneStyle,
    events: Vec<Event>,
}

impl Driver {
    pub(crate) fn new(game: Game, style: SceneStyle) -> Self {
        Self {
            game,
            style,
            events: Vec::new(),
        }
    }

    /// Scene describing the game before the first frame runs.
    pub(crate) fn initial_scene(&self) -> Scene {
        compose_scene(&self.game, &self.style)
    }

    /// Applies one frame of input and rewrites `scene` to match the game.
    pub(crate) fn frame(
        &mut self,
        dt: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> LoopControl {
        self.events.clear();

        for command in Self::commands(dt, input) {
            if let Err(err) = apply(&mut self.game, command, &mut self.events) {
                error!(error = %err, ?command, "command_failed");
            }
        }

        let audio = audio_requests(&self.events);
        *scene = compose_scene(&self.game, &self.style);
        scene.audio = audio;

        if query::is_running(&self.game) {
            LoopControl::Continue
        } else {
            LoopControl::Exit
        }
    }

    /// Boot leads every frame; the game ignores it once the menu is up.
    fn commands(dt: Duration, input: FrameInput) -> Vec<Command> {
        let mut commands = vec![Command::Boot];

        if input.quit {
            commands.push(Command::Quit);
            return commands;
        }

        if input.confirm {
            commands.push(Command::Confirm);
        } else if input.cancel {
            commands.push(Command::Cancel);
        }

        commands.push(Command::Tick {
            dt,
            input: input.movement,
        });
        commands
    }

    #[cfg(test)]
    fn game(&self) -> &Game {
        &self.game
    }
}
