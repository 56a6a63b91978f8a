//! Sources that provide the raw text rows of numbered levels.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use firefly_level::LevelGrid;
use thiserror::Error;
use tracing::info;

use crate::GameError;

/// Errors raised while fetching level text.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    /// The level file could not be read.
    #[error("failed to read level {level} from {}", path.display())]
    Read {
        /// One-based number of the level.
        level: u32,
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The source holds no level with this number.
    #[error("level {level} is not available")]
    Missing {
        /// One-based number of the level.
        level: u32,
    },
}

/// Provider of level rows, keyed by one-based level number.
pub trait LevelSource {
    /// Loads the rows of `level`.
    fn load(&self, level: u32) -> Result<Vec<String>, LevelLoadError>;
}

/// Reads `level{N}.txt` files from a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryLevels {
    root: PathBuf,
}

impl DirectoryLevels {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the level files are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing the provided level.
    #[must_use]
    pub fn path_for(&self, level: u32) -> PathBuf {
        self.root.join(format!("level{level}.txt"))
    }
}

impl LevelSource for DirectoryLevels {
    fn load(&self, level: u32) -> Result<Vec<String>, LevelLoadError> {
        let path = self.path_for(level);
        let contents = fs::read_to_string(&path).map_err(|source| LevelLoadError::Read {
            level,
            path: path.clone(),
            source,
        })?;
        Ok(contents.lines().map(str::to_owned).collect())
    }
}

/// Levels held in memory, used by tests and embedders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryLevels {
    levels: BTreeMap<u32, Vec<String>>,
}

impl InMemoryLevels {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rows of `level`.
    #[must_use]
    pub fn with_level<S>(mut self, level: u32, rows: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let rows = rows.iter().map(|row| row.as_ref().to_owned()).collect();
        let _ = self.levels.insert(level, rows);
        self
    }
}

impl LevelSource for InMemoryLevels {
    fn load(&self, level: u32) -> Result<Vec<String>, LevelLoadError> {
        self.levels
            .get(&level)
            .cloned()
            .ok_or(LevelLoadError::Missing { level })
    }
}

/// Loads and parses a single level.
pub(crate) fn build_level(source: &dyn LevelSource, level: u32) -> Result<LevelGrid, GameError> {
    let rows = source.load(level)?;
    LevelGrid::parse(&rows).map_err(|source| GameError::Level { level, source })
}

/// Parses every level of the campaign so a broken file aborts startup instead
/// of mid-game.
pub fn preflight(source: &dyn LevelSource, first: u32, last: u32) -> Result<(), GameError> {
    for level in first..=last {
        let _ = build_level(source, level)?;
    }

    info!(first, last, "campaign_preflight_passed");
    Ok(())
}
