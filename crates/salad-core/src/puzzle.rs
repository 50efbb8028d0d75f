//! Puzzle definitions and the word registry

use crate::grid::{Grid, GridError};
use crate::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors that make a puzzle definition unusable
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("invalid puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("puzzle has no words")]
    NoWords,

    #[error("duplicate word key \"{0}\"")]
    DuplicateKey(String),

    #[error("word \"{0}\" is empty")]
    EmptyWord(String),

    #[error("word \"{key}\" has {letters} letters but a path of {cells} cells")]
    PathLength {
        key: String,
        letters: usize,
        cells: usize,
    },

    #[error("word \"{key}\" references {pos}, outside the {size}x{size} grid")]
    PathOutOfBounds {
        key: String,
        pos: Position,
        size: usize,
    },

    #[error("word \"{key}\" visits {pos} more than once")]
    PathRepeatsCell { key: String, pos: Position },

    #[error("word \"{key}\" jumps from {from} to {to}, which are not adjacent")]
    PathNotContiguous {
        key: String,
        from: Position,
        to: Position,
    },
}

/// Puzzle as stored on disk: `path` entries are `[row, col]` pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub theme: String,
    pub size: usize,
    pub grid: String,
    pub words: Vec<WordRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    pub key: String,
    pub display: String,
    pub path: Vec<[usize; 2]>,
}

/// A target word and the only path that spells it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    key: String,
    display: String,
    path: Vec<Position>,
}

impl Word {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Number of letters in the word
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn covers(&self, pos: Position) -> bool {
        self.path.contains(&pos)
    }

    pub fn first_letter(&self) -> Option<char> {
        self.display.chars().next()
    }
}

/// A validated, read-only puzzle
#[derive(Debug, Clone)]
pub struct Puzzle {
    id: String,
    title: String,
    theme: String,
    grid: Grid,
    words: Vec<Word>,
}

impl Puzzle {
    /// Parse and validate a puzzle from its JSON form
    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        let record: PuzzleRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    /// Validate a decoded record. Nothing is returned unless the whole
    /// puzzle is consistent with its declared size.
    pub fn from_record(record: PuzzleRecord) -> Result<Self, PuzzleError> {
        let grid = Grid::parse(&record.grid, record.size)?;

        if record.words.is_empty() {
            return Err(PuzzleError::NoWords);
        }

        let mut keys = HashSet::new();
        let mut words = Vec::with_capacity(record.words.len());

        for word in record.words {
            if !keys.insert(word.key.clone()) {
                return Err(PuzzleError::DuplicateKey(word.key));
            }

            if word.path.is_empty() {
                return Err(PuzzleError::EmptyWord(word.key));
            }

            let letters = word.display.chars().count();
            if letters != word.path.len() {
                return Err(PuzzleError::PathLength {
                    key: word.key,
                    letters,
                    cells: word.path.len(),
                });
            }

            let path: Vec<Position> = word.path.into_iter().map(Position::from).collect();
            if let Some(&pos) = path.iter().find(|p| !p.in_bounds(grid.size())) {
                return Err(PuzzleError::PathOutOfBounds {
                    key: word.key,
                    pos,
                    size: grid.size(),
                });
            }

            let mut seen = HashSet::new();
            if let Some(&pos) = path.iter().find(|p| !seen.insert(**p)) {
                return Err(PuzzleError::PathRepeatsCell { key: word.key, pos });
            }

            if let Some(step) = path.windows(2).find(|step| !step[0].is_adjacent(step[1])) {
                return Err(PuzzleError::PathNotContiguous {
                    key: word.key,
                    from: step[0],
                    to: step[1],
                });
            }

            // Bounds were checked above, so spelling cannot fail here
            if let Ok(spelled) = grid.spell(&path) {
                if spelled != word.display {
                    tracing::warn!(
                        puzzle = %record.id,
                        key = %word.key,
                        expected = %word.display,
                        found = %spelled,
                        "word path does not spell its display string; it can never be matched"
                    );
                }
            }

            words.push(Word {
                key: word.key,
                display: word.display,
                path,
            });
        }

        tracing::debug!(puzzle = %record.id, words = words.len(), "puzzle loaded");

        Ok(Self {
            id: record.id,
            title: record.title,
            theme: record.theme,
            grid,
            words,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Words in registry (definition) order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, key: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(grid: &str, size: usize, words: Vec<WordRecord>) -> PuzzleRecord {
        PuzzleRecord {
            id: "test".to_string(),
            title: "Test".to_string(),
            theme: String::new(),
            size,
            grid: grid.to_string(),
            words,
        }
    }

    fn word(key: &str, display: &str, path: &[[usize; 2]]) -> WordRecord {
        WordRecord {
            key: key.to_string(),
            display: display.to_string(),
            path: path.to_vec(),
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "id": "mini",
            "title": "Mini",
            "theme": "letters",
            "size": 2,
            "grid": "AB\nCD",
            "words": [
                {"key": "w1", "display": "AB", "path": [[0,0],[0,1]]},
                {"key": "w2", "display": "AC", "path": [[0,0],[1,0]]}
            ]
        }"#;
        let puzzle = Puzzle::from_json(json).unwrap();
        assert_eq!(puzzle.id(), "mini");
        assert_eq!(puzzle.title(), "Mini");
        assert_eq!(puzzle.theme(), "letters");
        assert_eq!(puzzle.size(), 2);
        assert_eq!(puzzle.words().len(), 2);
        assert_eq!(puzzle.words()[1].key(), "w2");
        assert_eq!(
            puzzle.word("w2").unwrap().path(),
            &[Position::new(0, 0), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_theme_is_optional() {
        let json = r#"{"id":"x","title":"X","size":1,"grid":"A",
            "words":[{"key":"a","display":"A","path":[[0,0]]}]}"#;
        assert_eq!(Puzzle::from_json(json).unwrap().theme(), "");
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Puzzle::from_json("{"), Err(PuzzleError::Json(_))));
        // Negative coordinates cannot be decoded
        let json = r#"{"id":"x","title":"X","size":1,"grid":"A",
            "words":[{"key":"a","display":"A","path":[[-1,0]]}]}"#;
        assert!(matches!(Puzzle::from_json(json), Err(PuzzleError::Json(_))));
    }

    #[test]
    fn test_rejects_grid_size_mismatch() {
        let result = Puzzle::from_record(record("AB\nCD", 3, vec![word("a", "A", &[[0, 0]])]));
        assert!(matches!(
            result,
            Err(PuzzleError::Grid(GridError::RowCount { expected: 3, found: 2 }))
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds_path() {
        let result = Puzzle::from_record(record(
            "AB\nCD",
            2,
            vec![word("w", "BX", &[[0, 1], [0, 2]])],
        ));
        match result {
            Err(PuzzleError::PathOutOfBounds { key, pos, size }) => {
                assert_eq!(key, "w");
                assert_eq!(pos, Position::new(0, 2));
                assert_eq!(size, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_path_length_mismatch() {
        let result = Puzzle::from_record(record("AB\nCD", 2, vec![word("w", "ABC", &[[0, 0], [0, 1]])]));
        assert!(matches!(
            result,
            Err(PuzzleError::PathLength { letters: 3, cells: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_path_with_gap() {
        let result = Puzzle::from_record(record(
            "AXB\nXXX\nXXX",
            3,
            vec![word("ab", "AB", &[[0, 0], [0, 2]])],
        ));
        match result {
            Err(PuzzleError::PathNotContiguous { key, from, to }) => {
                assert_eq!(key, "ab");
                assert_eq!(from, Position::new(0, 0));
                assert_eq!(to, Position::new(0, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_path_revisiting_cell() {
        let result = Puzzle::from_record(record(
            "AB\nCD",
            2,
            vec![word("w", "ABA", &[[0, 0], [0, 1], [0, 0]])],
        ));
        assert!(matches!(
            result,
            Err(PuzzleError::PathRepeatsCell { pos, .. }) if pos == Position::new(0, 0)
        ));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let result = Puzzle::from_record(record(
            "AB\nCD",
            2,
            vec![word("w", "AB", &[[0, 0], [0, 1]]), word("w", "CD", &[[1, 0], [1, 1]])],
        ));
        assert!(matches!(result, Err(PuzzleError::DuplicateKey(k)) if k == "w"));
    }

    #[test]
    fn test_rejects_empty_word() {
        let result = Puzzle::from_record(record("AB\nCD", 2, vec![word("w", "", &[])]));
        assert!(matches!(result, Err(PuzzleError::EmptyWord(k)) if k == "w"));
    }

    #[test]
    fn test_rejects_empty_word_list() {
        let result = Puzzle::from_record(record("AB\nCD", 2, vec![]));
        assert!(matches!(result, Err(PuzzleError::NoWords)));
    }

    #[test]
    fn test_inconsistent_letters_still_load() {
        let puzzle =
            Puzzle::from_record(record("AB\nCD", 2, vec![word("w", "XY", &[[0, 0], [0, 1]])])).unwrap();
        assert_eq!(puzzle.words()[0].display(), "XY");
    }

    #[test]
    fn test_word_helpers() {
        let puzzle =
            Puzzle::from_record(record("AB\nCD", 2, vec![word("w", "AD", &[[0, 0], [1, 1]])])).unwrap();
        let w = &puzzle.words()[0];
        assert_eq!(w.len(), 2);
        assert!(!w.is_empty());
        assert!(w.covers(Position::new(1, 1)));
        assert!(!w.covers(Position::new(0, 1)));
        assert_eq!(w.first_letter(), Some('A'));
    }
}
