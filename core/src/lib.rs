#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the Firefly workspace.
//!
//! The level parser, the motion systems, the game state machine and every
//! adapter speak in terms of the types defined here. Nothing in this crate
//! performs I/O; adapters translate these values into pixels, sound and
//! keyboard state.

use std::time::Duration;

use serde::Deserialize;

/// Title displayed by windows and the main menu.
pub const GAME_TITLE: &str = "Firefly";

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that neighbor lookups and player moves past the
/// edge of an unwalled level remain representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the cell displaced by the provided column and row offsets.
    #[must_use]
    pub const fn translate(self, columns: i32, rows: i32) -> Self {
        Self {
            column: self.column.saturating_add(columns),
            row: self.row.saturating_add(rows),
        }
    }

    /// Returns the orthogonal neighbor reached by travelling in `direction`.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (columns, rows) = direction.offset();
        self.translate(columns, rows)
    }

    /// Column and row displacement that leads from `self` to `other`.
    #[must_use]
    pub const fn displacement_to(self, other: CellCoord) -> (i32, i32) {
        (
            other.column.saturating_sub(self.column),
            other.row.saturating_sub(self.row),
        )
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Cardinal movement directions available to grid entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Unit column and row offsets travelled by a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Reports whether the direction points toward decreasing columns.
    #[must_use]
    pub const fn faces_left(self) -> bool {
        matches!(self, Self::West)
    }
}

/// Held movement keys sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionalInput {
    /// Whether the "up" key is held.
    pub up: bool,
    /// Whether the "down" key is held.
    pub down: bool,
    /// Whether the "left" key is held.
    pub left: bool,
    /// Whether the "right" key is held.
    pub right: bool,
}

impl DirectionalInput {
    /// Input with no movement keys held.
    pub const IDLE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Input holding exactly the key that travels in `direction`.
    #[must_use]
    pub const fn toward(direction: Direction) -> Self {
        let mut input = Self::IDLE;
        match direction {
            Direction::North => input.up = true,
            Direction::East => input.right = true,
            Direction::South => input.down = true,
            Direction::West => input.left = true,
        }
        input
    }

    /// Collapses the held keys into a single cardinal direction.
    ///
    /// Diagonal travel is not allowed. Vertical keys win over horizontal keys,
    /// and within an axis the first key in the order up, down, left, right
    /// wins, so the result is deterministic for every key combination.
    #[must_use]
    pub const fn resolve(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::North)
        } else if self.down {
            Some(Direction::South)
        } else if self.left {
            Some(Direction::West)
        } else if self.right {
            Some(Direction::East)
        } else {
            None
        }
    }
}

/// Single cell of an authored level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Impassable wall (`#`).
    Wall,
    /// Walkable cell without a special role (space or any unknown symbol).
    Floor,
    /// Player spawn point (`P`).
    PlayerSpawn,
    /// Destination of the guide's path (`F`).
    GuideEnd,
    /// Path step toward increasing columns (`r`).
    PathRight,
    /// Path step toward decreasing columns (`l`).
    PathLeft,
    /// Path step toward decreasing rows (`u`).
    PathUp,
    /// Path step toward increasing rows (`d`).
    PathDown,
    /// Repeats the previous path displacement (`_`).
    PathContinue,
}

impl Tile {
    /// Maps a level file symbol to its tile. Unknown symbols are floor.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => Self::Wall,
            'P' => Self::PlayerSpawn,
            'F' => Self::GuideEnd,
            'r' => Self::PathRight,
            'l' => Self::PathLeft,
            'u' => Self::PathUp,
            'd' => Self::PathDown,
            '_' => Self::PathContinue,
            _ => Self::Floor,
        }
    }

    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Direction encoded by an explicit path tile.
    ///
    /// [`Tile::PathContinue`] carries no direction of its own and yields `None`.
    #[must_use]
    pub const fn path_direction(self) -> Option<Direction> {
        match self {
            Self::PathRight => Some(Direction::East),
            Self::PathLeft => Some(Direction::West),
            Self::PathUp => Some(Direction::North),
            Self::PathDown => Some(Direction::South),
            _ => None,
        }
    }
}

/// Coarse identity of the active game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStateKind {
    /// Title screen waiting for the player to start.
    Menu,
    /// A level is being played.
    Play,
    /// Narrative slides shown after the final level.
    Slideshow,
    /// Closing screen.
    End,
}

/// Looping background themes requested on state transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Theme played on the title screen.
    MenuTheme,
    /// Theme played while a level is active.
    GameTheme,
}

impl AudioCue {
    /// Every cue the game may request, in a stable order.
    pub const ALL: [AudioCue; 2] = [AudioCue::MenuTheme, AudioCue::GameTheme];

    /// File name of the sound asset backing the cue.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MenuTheme => "menu.ogg",
            Self::GameTheme => "game.ogg",
        }
    }
}

/// Character voicing a narrative slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The glowing guide.
    #[serde(alias = "guide")]
    Firefly,
    /// The player character.
    Player,
}

impl Speaker {
    /// Name printed above the slide text.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Firefly => "Firefly",
            Self::Player => "Player",
        }
    }
}

/// Opaque byte RGB color as authored in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// One page of the closing narrative.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Slide {
    /// Character voicing the line.
    pub speaker: Speaker,
    /// Line of dialogue shown on the slide.
    pub text: String,
    /// Color used for the dialogue text.
    #[serde(default = "Slide::default_color")]
    pub color: Rgb,
}

impl Slide {
    /// Creates a new slide.
    #[must_use]
    pub fn new(speaker: Speaker, text: impl Into<String>, color: Rgb) -> Self {
        Self {
            speaker,
            text: text.into(),
            color,
        }
    }

    fn default_color() -> Rgb {
        Rgb::new(255, 255, 255)
    }
}

/// Commands that drive the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Starts the title theme. Issued once when the window opens.
    Boot,
    /// Player pressed the confirm key.
    Confirm,
    /// Player pressed the cancel key.
    Cancel,
    /// The window was closed or the process asked to stop.
    Quit,
    /// Advances every active timer by the provided delta time.
    Tick {
        /// Wall-clock time elapsed since the previous tick.
        dt: Duration,
        /// Movement keys held during the frame.
        input: DirectionalInput,
    },
}

/// Events emitted by the game state machine after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The active state changed.
    StateChanged {
        /// State that was active before the transition.
        from: GameStateKind,
        /// State that became active.
        to: GameStateKind,
    },
    /// A fresh level session started.
    LevelStarted {
        /// One-based number of the level.
        level: u32,
    },
    /// The player reached the guide's destination.
    LevelCompleted {
        /// One-based number of the level that was finished.
        level: u32,
    },
    /// A background theme should start playing.
    AudioStarted {
        /// Theme to play.
        cue: AudioCue,
        /// Whether playback repeats until stopped.
        looped: bool,
    },
    /// A background theme should stop.
    AudioStopped {
        /// Theme to stop.
        cue: AudioCue,
    },
    /// A narrative slide became visible.
    SlideShown {
        /// Zero-based index of the slide.
        index: usize,
    },
    /// Simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The game finished; the frame loop should exit.
    Terminated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_input_wins_over_horizontal() {
        let input = DirectionalInput {
            up: false,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(input.resolve(), Some(Direction::South));
    }

    #[test]
    fn up_wins_over_down_when_both_held() {
        let input = DirectionalInput {
            up: true,
            down: true,
            ..DirectionalInput::IDLE
        };
        assert_eq!(input.resolve(), Some(Direction::North));
    }

    #[test]
    fn idle_input_resolves_to_nothing() {
        assert_eq!(DirectionalInput::IDLE.resolve(), None);
        assert_eq!(DirectionalInput::default(), DirectionalInput::IDLE);
    }

    #[test]
    fn toward_round_trips_through_resolve() {
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            let input = DirectionalInput::toward(direction);
            assert_eq!(input.resolve(), Some(direction));
        }
    }

    #[test]
    fn neighbor_moves_by_unit_offset() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(origin.neighbor(Direction::North), CellCoord::new(3, 2));
        assert_eq!(origin.neighbor(Direction::East), CellCoord::new(4, 3));
        assert_eq!(origin.neighbor(Direction::South), CellCoord::new(3, 4));
        assert_eq!(origin.neighbor(Direction::West), CellCoord::new(2, 3));
    }

    #[test]
    fn neighbor_of_origin_can_leave_the_grid() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.neighbor(Direction::West), CellCoord::new(-1, 0));
    }

    #[test]
    fn displacement_matches_translation() {
        let from = CellCoord::new(2, 5);
        let to = CellCoord::new(4, 1);
        let (columns, rows) = from.displacement_to(to);
        assert_eq!(from.translate(columns, rows), to);
        assert_eq!(from.manhattan_distance(to), 6);
    }

    #[test]
    fn symbols_map_to_tiles() {
        assert_eq!(Tile::from_symbol('#'), Tile::Wall);
        assert_eq!(Tile::from_symbol('P'), Tile::PlayerSpawn);
        assert_eq!(Tile::from_symbol('F'), Tile::GuideEnd);
        assert_eq!(Tile::from_symbol('_'), Tile::PathContinue);
        assert_eq!(Tile::from_symbol(' '), Tile::Floor);
        assert_eq!(Tile::from_symbol('x'), Tile::Floor);
        assert_eq!(Tile::from_symbol('R'), Tile::Floor);
    }

    #[test]
    fn only_explicit_path_tiles_carry_a_direction() {
        assert_eq!(Tile::PathRight.path_direction(), Some(Direction::East));
        assert_eq!(Tile::PathUp.path_direction(), Some(Direction::North));
        assert_eq!(Tile::PathContinue.path_direction(), None);
        assert_eq!(Tile::GuideEnd.path_direction(), None);
    }

    #[test]
    fn rgb_converts_from_array() {
        let color = Rgb::from([1, 2, 3]);
        assert_eq!((color.red(), color.green(), color.blue()), (1, 2, 3));
    }
}
