//! Immutable letter matrix of a puzzle

use crate::Position;
use std::fmt;

/// Errors produced when decoding or reading a grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} letters, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell {pos} is outside the {size}x{size} grid")]
    OutOfBounds { pos: Position, size: usize },
}

/// A square grid of letters addressed by (row, col)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    letters: Vec<char>,
}

impl Grid {
    /// Decode grid text: one line per row, one character per column.
    ///
    /// Lines may end in `\n` or `\r\n`, and a single trailing line break is
    /// accepted. Every row must hold exactly `size` characters.
    pub fn parse(text: &str, size: usize) -> Result<Self, GridError> {
        let rows: Vec<&str> = if text.is_empty() {
            Vec::new()
        } else {
            text.lines().collect()
        };

        if rows.len() != size {
            return Err(GridError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }

        let mut letters = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let before = letters.len();
            letters.extend(line.chars());
            let found = letters.len() - before;
            if found != size {
                return Err(GridError::RowLength {
                    row,
                    expected: size,
                    found,
                });
            }
        }

        Ok(Self { size, letters })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the letter at a cell
    pub fn letter_at(&self, pos: Position) -> Result<char, GridError> {
        if !pos.in_bounds(self.size) {
            return Err(GridError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        Ok(self.letters[pos.row * self.size + pos.col])
    }

    /// Read the letters along a path, in order
    pub fn spell(&self, path: &[Position]) -> Result<String, GridError> {
        path.iter().map(|&pos| self.letter_at(pos)).collect()
    }

    /// Iterate over every cell position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.letters.chunks(self.size.max(1)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for ch in row {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
