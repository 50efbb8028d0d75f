//! Puzzle catalog backed by a directory of `<id>.json` files

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use salad_core::{Puzzle, PuzzleError};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("cannot read puzzle directory {}: {source}", .dir.display())]
    Directory {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("no puzzles found in {}", .0.display())]
    Empty(PathBuf),

    #[error("puzzle \"{0}\" not found")]
    NotFound(String),

    #[error("cannot read puzzle \"{id}\": {source}")]
    Read {
        id: String,
        source: std::io::Error,
    },

    #[error("puzzle \"{id}\" is invalid: {source}")]
    Invalid {
        id: String,
        source: PuzzleError,
    },
}

#[derive(Debug, Clone)]
pub struct Library {
    dir: PathBuf,
}

impl Library {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids of every puzzle file, sorted
    pub fn ids(&self) -> Result<Vec<String>, LibraryError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| LibraryError::Directory {
            dir: self.dir.clone(),
            source,
        })?;

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        ids.sort();

        tracing::debug!(dir = %self.dir.display(), count = ids.len(), "catalog scanned");
        Ok(ids)
    }

    /// Read and validate one puzzle
    pub fn load(&self, id: &str) -> Result<Puzzle, LibraryError> {
        let path = self.dir.join(format!("{}.json", id));
        let json = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LibraryError::NotFound(id.to_string())
            } else {
                LibraryError::Read {
                    id: id.to_string(),
                    source,
                }
            }
        })?;

        let puzzle = Puzzle::from_json(&json).map_err(|source| LibraryError::Invalid {
            id: id.to_string(),
            source,
        })?;

        if puzzle.id() != id {
            tracing::warn!(file = id, declared = puzzle.id(), "puzzle id differs from file name");
        }
        Ok(puzzle)
    }

    /// Id of the puzzle for `date`
    pub fn daily_id(&self, date: NaiveDate) -> Result<String, LibraryError> {
        let ids = self.ids()?;
        pick_daily(&ids, date)
            .map(str::to_string)
            .ok_or_else(|| LibraryError::Empty(self.dir.clone()))
    }

    pub fn random_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, LibraryError> {
        let ids = self.ids()?;
        ids.choose(rng)
            .cloned()
            .ok_or_else(|| LibraryError::Empty(self.dir.clone()))
    }
}

/// Date as the number `YYYYMMDD`
pub fn date_seed(date: NaiveDate) -> u64 {
    date.year().max(0) as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

/// Daily pick: the date seed modulo the catalog size
pub fn pick_daily(ids: &[String], date: NaiveDate) -> Option<&str> {
    if ids.is_empty() {
        return None;
    }
    let index = (date_seed(date) % ids.len() as u64) as usize;
    ids.get(index).map(String::as_str)
}
