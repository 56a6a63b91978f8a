#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state machine for Firefly.
//!
//! The game moves through Menu, Play, an optional closing Slideshow and End.
//! Adapters feed it [`Command`] values through [`apply`] and react to the
//! [`Event`] values it emits; read-only access goes through [`query`].
//! Transition side effects such as audio cues are emitted by the same `apply`
//! call that swaps the state, so no half-finished transition is observable.

mod levels;
mod session;

use std::{mem, time::Duration};

use firefly_core::{AudioCue, Command, DirectionalInput, Event, GameStateKind, Slide};
use firefly_level::LevelError;
use firefly_settings::Settings;
use firefly_system_motion::{GuideConfig, PlayerConfig};
use thiserror::Error;
use tracing::{debug, info};

pub use levels::{preflight, DirectoryLevels, InMemoryLevels, LevelLoadError, LevelSource};

use session::{Session, Slideshow};

/// Errors surfaced while applying commands.
#[derive(Debug, Error)]
pub enum GameError {
    /// The level text could not be fetched.
    #[error(transparent)]
    Load(#[from] LevelLoadError),
    /// The level text could not be parsed.
    #[error("level {level} cannot be played")]
    Level {
        /// One-based number of the level.
        level: u32,
        /// Parser failure.
        #[source]
        source: LevelError,
    },
}

/// Campaign and pacing parameters consumed by the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Level entered from the menu at startup.
    pub initial_level: u32,
    /// Number of the final level.
    pub total_levels: u32,
    /// Player pacing.
    pub player: PlayerConfig,
    /// Guide pacing.
    pub guide: GuideConfig,
    /// Closing narrative; empty skips straight to the end screen.
    pub slides: Vec<Slide>,
}

impl GameConfig {
    /// Derives the game parameters from validated settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            initial_level: settings.game.initial_level,
            total_levels: settings.game.total_levels,
            player: PlayerConfig {
                move_cadence: settings.player_move_cadence(),
                animation_cadence: settings.player_animation_cadence(),
            },
            guide: GuideConfig {
                move_cadence: settings.guide_move_cadence(),
                animation_cadence: settings.guide_animation_cadence(),
            },
            slides: settings.slides.clone(),
        }
    }
}

#[derive(Clone, Debug)]
enum State {
    Menu,
    Play(Session),
    Slideshow(Slideshow),
    End,
}

impl State {
    fn kind(&self) -> GameStateKind {
        match self {
            Self::Menu => GameStateKind::Menu,
            Self::Play(_) => GameStateKind::Play,
            Self::Slideshow(_) => GameStateKind::Slideshow,
            Self::End => GameStateKind::End,
        }
    }
}

/// Represents the complete Firefly game.
pub struct Game {
    config: GameConfig,
    source: Box<dyn LevelSource>,
    state: State,
    current_level: u32,
    theme: Option<AudioCue>,
    booted: bool,
    running: bool,
}

impl Game {
    /// Creates a game resting on the menu.
    #[must_use]
    pub fn new(config: GameConfig, source: Box<dyn LevelSource>) -> Self {
        let current_level = config.initial_level;
        Self {
            config,
            source,
            state: State::Menu,
            current_level,
            theme: None,
            booted: false,
            running: true,
        }
    }

    fn transition(&mut self, next: State, out_events: &mut Vec<Event>) {
        let previous = mem::replace(&mut self.state, next);
        self.announce(previous.kind(), out_events);
    }

    fn announce(&self, from: GameStateKind, out_events: &mut Vec<Event>) {
        let to = self.state.kind();
        info!(?from, ?to, "state_changed");
        out_events.push(Event::StateChanged { from, to });
        if let State::Slideshow(slideshow) = &self.state {
            out_events.push(Event::SlideShown {
                index: slideshow.index,
            });
        }
    }

    fn play_theme(&mut self, cue: AudioCue, out_events: &mut Vec<Event>) {
        if self.theme == Some(cue) {
            return;
        }

        self.stop_theme(out_events);
        self.theme = Some(cue);
        out_events.push(Event::AudioStarted { cue, looped: true });
    }

    fn stop_theme(&mut self, out_events: &mut Vec<Event>) {
        if let Some(cue) = self.theme.take() {
            out_events.push(Event::AudioStopped { cue });
        }
    }

    fn boot(&mut self, out_events: &mut Vec<Event>) {
        if self.booted {
            return;
        }

        self.booted = true;
        if matches!(self.state, State::Menu) {
            self.play_theme(AudioCue::MenuTheme, out_events);
        }
    }

    fn start_level(&mut self, out_events: &mut Vec<Event>) -> Result<(), GameError> {
        let level = self.current_level;
        let grid = levels::build_level(self.source.as_ref(), level)?;
        let session = Session::new(level, grid, &self.config);

        self.transition(State::Play(session), out_events);
        info!(level, "level_started");
        out_events.push(Event::LevelStarted { level });
        self.play_theme(AudioCue::GameTheme, out_events);
        Ok(())
    }

    fn return_to_menu(&mut self, out_events: &mut Vec<Event>) {
        self.transition(State::Menu, out_events);
        self.play_theme(AudioCue::MenuTheme, out_events);
    }

    fn complete_level(&mut self, out_events: &mut Vec<Event>) -> Result<(), GameError> {
        let level = self.current_level;
        if level >= self.config.total_levels {
            info!(level, "level_completed");
            out_events.push(Event::LevelCompleted { level });
            self.finish_campaign(out_events);
            return Ok(());
        }

        let next = level + 1;
        let grid = match levels::build_level(self.source.as_ref(), next) {
            Ok(grid) => grid,
            Err(error) => {
                self.return_to_menu(out_events);
                return Err(error);
            }
        };
        info!(level, "level_completed");
        out_events.push(Event::LevelCompleted { level });

        self.current_level = next;
        self.state = State::Play(Session::new(next, grid, &self.config));
        info!(level = next, "level_started");
        out_events.push(Event::LevelStarted { level: next });
        Ok(())
    }

    fn finish_campaign(&mut self, out_events: &mut Vec<Event>) {
        self.stop_theme(out_events);
        let previous = mem::replace(&mut self.state, State::End);
        let from = previous.kind();
        if let State::Play(session) = previous {
            if !self.config.slides.is_empty() {
                self.state = State::Slideshow(Slideshow::from_session(session));
            }
        }
        self.announce(from, out_events);
    }

    fn advance_slide(&mut self, out_events: &mut Vec<Event>) {
        let State::Slideshow(slideshow) = &mut self.state else {
            return;
        };

        if slideshow.index + 1 < self.config.slides.len() {
            slideshow.index += 1;
            out_events.push(Event::SlideShown {
                index: slideshow.index,
            });
        } else {
            self.transition(State::End, out_events);
        }
    }

    fn terminate(&mut self, out_events: &mut Vec<Event>) {
        self.stop_theme(out_events);
        self.running = false;
        info!(state = ?self.state.kind(), "game_terminated");
        out_events.push(Event::Terminated);
    }

    fn tick(
        &mut self,
        dt: Duration,
        input: DirectionalInput,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        out_events.push(Event::TimeAdvanced { dt });

        let completed = match &mut self.state {
            State::Play(session) => session.update(dt, input),
            State::Slideshow(slideshow) => {
                slideshow.animate(dt);
                false
            }
            State::Menu | State::End => false,
        };

        if completed {
            self.complete_level(out_events)?;
        }
        Ok(())
    }
}

/// Applies the provided command to the game, mutating state deterministically.
///
/// Commands that do not apply to the active state are ignored, as is every
/// command after the game terminated. A level that fails to load from the
/// menu leaves the game on the menu; a next level that fails to load sends the
/// game back to the menu, so the failure is reported once.
pub fn apply(
    game: &mut Game,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), GameError> {
    if !game.running {
        debug!(?command, "command_after_termination");
        return Ok(());
    }

    match (command, game.state.kind()) {
        (Command::Boot, _) => game.boot(out_events),
        (Command::Quit, _) | (Command::Cancel, GameStateKind::End) => game.terminate(out_events),
        (Command::Confirm, GameStateKind::Menu) => game.start_level(out_events)?,
        (Command::Confirm, GameStateKind::Slideshow) => game.advance_slide(out_events),
        (Command::Cancel, GameStateKind::Play) => game.return_to_menu(out_events),
        (Command::Tick { dt, input }, _) => game.tick(dt, input, out_events)?,
        (Command::Confirm | Command::Cancel, _) => {}
    }

    Ok(())
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use firefly_core::{GameStateKind, Slide};
    use firefly_level::LevelGrid;
    use firefly_system_motion::{Guide, Player};

    use super::{Game, State};

    /// Coarse identity of the active state.
    #[must_use]
    pub fn state(game: &Game) -> GameStateKind {
        game.state.kind()
    }

    /// Reports whether the frame loop should keep running.
    #[must_use]
    pub fn is_running(game: &Game) -> bool {
        game.running
    }

    /// Layout of the level being played.
    #[must_use]
    pub fn level_grid(game: &Game) -> Option<&LevelGrid> {
        match &game.state {
            State::Play(session) => Some(&session.grid),
            _ => None,
        }
    }

    /// Player of the active session, or the slideshow portrait.
    #[must_use]
    pub fn player(game: &Game) -> Option<&Player> {
        match &game.state {
            State::Play(session) => Some(&session.player),
            State::Slideshow(slideshow) => Some(&slideshow.player),
            State::Menu | State::End => None,
        }
    }

    /// Guide of the active session, or the slideshow portrait.
    #[must_use]
    pub fn guide(game: &Game) -> Option<&Guide> {
        match &game.state {
            State::Play(session) => Some(&session.guide),
            State::Slideshow(slideshow) => Some(&slideshow.guide),
            State::Menu | State::End => None,
        }
    }

    /// Index of the visible slide.
    #[must_use]
    pub fn slide_index(game: &Game) -> Option<usize> {
        match &game.state {
            State::Slideshow(slideshow) => Some(slideshow.index),
            _ => None,
        }
    }

    /// Slide currently shown.
    #[must_use]
    pub fn slide(game: &Game) -> Option<&Slide> {
        slide_index(game).and_then(|index| game.config.slides.get(index))
    }
}
