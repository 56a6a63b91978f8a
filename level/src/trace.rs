//! Guide path tracer that replays the directional tiles authored in a level.

use std::collections::HashSet;

use firefly_core::{CellCoord, Direction, Tile};

/// Order in which the neighbors of the spawn are scanned for the first path tile.
const START_SCAN_ORDER: [Direction; 4] = [
    Direction::South,
    Direction::East,
    Direction::North,
    Direction::West,
];

/// Reason the tracer stopped walking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOutcome {
    /// The walk arrived at the guide destination.
    Reached,
    /// The level has no guide destination tile.
    NoDestination,
    /// No explicit path tile borders the player spawn.
    NoStart,
    /// The walk hit a cell that does not continue the path.
    DeadEnd {
        /// Cell at which the walk stopped.
        at: CellCoord,
    },
    /// The walk re-entered a cell it had already visited.
    Cycle {
        /// Revisited cell.
        at: CellCoord,
    },
}

/// Result of walking the authored path tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTrace {
    cells: Vec<CellCoord>,
    outcome: TraceOutcome,
}

impl PathTrace {
    fn empty(outcome: TraceOutcome) -> Self {
        Self {
            cells: Vec::new(),
            outcome,
        }
    }

    /// Cells visited in walk order, including the destination when reached.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Reason the walk stopped.
    #[must_use]
    pub const fn outcome(&self) -> TraceOutcome {
        self.outcome
    }

    /// Reports whether the walk arrived at the destination.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.outcome, TraceOutcome::Reached)
    }
}

/// Traces the guide path that begins next to `spawn`.
///
/// The first explicit path tile found among the spawn's neighbors, scanned
/// down, right, up, left, starts the walk.
pub(crate) fn trace_from_spawn<F>(
    spawn: CellCoord,
    destination: Option<CellCoord>,
    tile_at: F,
) -> PathTrace
where
    F: Fn(CellCoord) -> Option<Tile>,
{
    let Some(destination) = destination else {
        return PathTrace::empty(TraceOutcome::NoDestination);
    };

    let start = START_SCAN_ORDER
        .into_iter()
        .map(|direction| spawn.neighbor(direction))
        .find(|cell| tile_at(*cell).and_then(Tile::path_direction).is_some());

    match start {
        Some(start) => walk(start, destination, tile_at),
        None => PathTrace::empty(TraceOutcome::NoStart),
    }
}

/// Walks path tiles from `start` until `destination`, a dead end or a cycle.
///
/// `tile_at` returns `None` for cells outside the level. The visited set
/// bounds the walk by the number of cells in the level.
pub fn walk<F>(start: CellCoord, destination: CellCoord, tile_at: F) -> PathTrace
where
    F: Fn(CellCoord) -> Option<Tile>,
{
    let mut cells = Vec::new();
    let mut visited = HashSet::new();
    let mut current = start;

    let outcome = loop {
        if current == destination {
            cells.push(current);
            break TraceOutcome::Reached;
        }

        let Some(tile) = tile_at(current) else {
            break TraceOutcome::DeadEnd { at: current };
        };

        if !visited.insert(current) {
            break TraceOutcome::Cycle { at: current };
        }
        cells.push(current);

        if let Some(direction) = tile.path_direction() {
            current = current.neighbor(direction);
            continue;
        }

        if tile != Tile::PathContinue {
            break TraceOutcome::DeadEnd { at: current };
        }

        match cells.as_slice() {
            [.., previous, last] => {
                let (columns, rows) = previous.displacement_to(*last);
                current = current.translate(columns, rows);
            }
            _ => break TraceOutcome::DeadEnd { at: current },
        }
    };

    PathTrace { cells, outcome }
}
