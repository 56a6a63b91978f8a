#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level parsing for Firefly.
//!
//! A level is authored as plain text, one row per line and one character per
//! cell. Parsing classifies every cell as wall or floor, locates the player
//! spawn and the guide destination, and replays the directional tiles to
//! produce the guide's path. The resulting [`LevelGrid`] is immutable and is
//! shared read-only by every entity for the lifetime of the level.

pub mod trace;

use std::collections::BTreeSet;

use firefly_core::{CellCoord, Tile};
use thiserror::Error;
use tracing::debug;

pub use trace::{walk, PathTrace, TraceOutcome};

/// Errors raised while building a level.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// The level has no player spawn tile, so it cannot be played.
    #[error("malformed level: no player spawn tile `P`")]
    MalformedLevel,
}

/// Parsed, immutable level layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelGrid {
    rows: Vec<Vec<Tile>>,
    walls: BTreeSet<CellCoord>,
    floors: BTreeSet<CellCoord>,
    player_spawn: CellCoord,
    guide_end: Option<CellCoord>,
    trace: PathTrace,
}

impl LevelGrid {
    /// Parses a level from its text rows.
    ///
    /// Returns [`LevelError::MalformedLevel`] when no player spawn exists. A
    /// missing guide destination or a broken path is not an error: the level
    /// is built with an empty guide path.
    pub fn parse<S>(rows: &[S]) -> Result<Self, LevelError>
    where
        S: AsRef<str>,
    {
        let rows: Vec<Vec<Tile>> = rows
            .iter()
            .map(|row| row.as_ref().chars().map(Tile::from_symbol).collect())
            .collect();

        let mut walls = BTreeSet::new();
        let mut floors = BTreeSet::new();
        let mut player_spawn = None;
        let mut guide_end = None;

        for (cell, tile) in cells(&rows) {
            if tile.is_wall() {
                let _ = walls.insert(cell);
            } else {
                let _ = floors.insert(cell);
            }

            match tile {
                Tile::PlayerSpawn => player_spawn = Some(cell),
                Tile::GuideEnd => guide_end = Some(cell),
                _ => {}
            }
        }

        let player_spawn = player_spawn.ok_or(LevelError::MalformedLevel)?;
        let trace = trace::trace_from_spawn(player_spawn, guide_end, |cell| tile_at(&rows, cell));
        debug!(
            outcome = ?trace.outcome(),
            length = trace.cells().len(),
            "guide_path_traced"
        );

        Ok(Self {
            rows,
            walls,
            floors,
            player_spawn,
            guide_end,
            trace,
        })
    }

    /// Parses a level from a complete file body, one row per line.
    pub fn from_text(text: &str) -> Result<Self, LevelError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::parse(&rows)
    }

    /// Tile at the provided cell, or `None` outside the authored rows.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        tile_at(&self.rows, cell)
    }

    /// Reports whether the cell holds a wall.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.walls.contains(&cell)
    }

    /// Every wall cell.
    #[must_use]
    pub fn walls(&self) -> &BTreeSet<CellCoord> {
        &self.walls
    }

    /// Every non-wall cell, including spawn, destination and path tiles.
    #[must_use]
    pub fn floors(&self) -> &BTreeSet<CellCoord> {
        &self.floors
    }

    /// Cell where the player starts.
    #[must_use]
    pub const fn player_spawn(&self) -> CellCoord {
        self.player_spawn
    }

    /// Cell the guide travels toward, if the level has one.
    #[must_use]
    pub const fn guide_end(&self) -> Option<CellCoord> {
        self.guide_end
    }

    /// Guide path from next to the spawn up to the destination.
    ///
    /// Empty unless the authored path reaches the destination.
    #[must_use]
    pub fn guide_path(&self) -> &[CellCoord] {
        if self.trace.is_complete() {
            self.trace.cells()
        } else {
            &[]
        }
    }

    /// Raw result of the path walk, including partial walks.
    #[must_use]
    pub const fn trace(&self) -> &PathTrace {
        &self.trace
    }

    /// Number of rows in the level.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the widest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn cells(rows: &[Vec<Tile>]) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
    rows.iter().enumerate().flat_map(|(row, tiles)| {
        tiles
            .iter()
            .enumerate()
            .map(move |(column, tile)| (cell_at(column, row), *tile))
    })
}

fn cell_at(column: usize, row: usize) -> CellCoord {
    let column = i32::try_from(column).unwrap_or(i32::MAX);
    let row = i32::try_from(row).unwrap_or(i32::MAX);
    CellCoord::new(column, row)
}

fn tile_at(rows: &[Vec<Tile>], cell: CellCoord) -> Option<Tile> {
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    rows.get(row)?.get(column).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_destination_are_floor() {
        let level = LevelGrid::parse(&["#P#", "#F#"]).expect("level has a spawn");

        assert!(level.floors().contains(&CellCoord::new(1, 0)));
        assert!(level.floors().contains(&CellCoord::new(1, 1)));
        assert_eq!(level.walls().len(), 4);
    }

    #[test]
    fn ragged_rows_are_out_of_bounds_past_their_end() {
        let level = LevelGrid::parse(&["#####", "#P", "###"]).expect("level has a spawn");

        assert_eq!(level.tile(CellCoord::new(4, 0)), Some(Tile::Wall));
        assert_eq!(level.tile(CellCoord::new(2, 1)), None);
        assert_eq!(level.tile(CellCoord::new(-1, 0)), None);
        assert_eq!(level.width(), 5);
        assert_eq!(level.row_count(), 3);
    }

    #[test]
    fn last_spawn_in_row_major_order_wins() {
        let level = LevelGrid::parse(&["P  ", "  P"]).expect("level has a spawn");
        assert_eq!(level.player_spawn(), CellCoord::new(2, 1));
    }

    #[test]
    fn from_text_strips_line_endings() {
        let level = LevelGrid::from_text("###\r\n#P#\r\n###\r\n").expect("level has a spawn");
        assert_eq!(level.width(), 3);
        assert_eq!(level.player_spawn(), CellCoord::new(1, 1));
    }
}
