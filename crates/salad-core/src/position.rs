//! Grid coordinates and adjacency

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the letter grid (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Two cells are adjacent when they touch in any of the eight directions.
    /// A cell is never adjacent to itself.
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }

    /// Check that the position lies inside a `size`×`size` grid
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Self::new(row, col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_includes_diagonals() {
        let center = Position::new(1, 1);
        for row in 0..3 {
            for col in 0..3 {
                let other = Position::new(row, col);
                assert_eq!(center.is_adjacent(other), other != center, "{other}");
            }
        }
    }

    #[test]
    fn test_adjacency_rejects_distance_two() {
        let corner = Position::new(0, 0);
        assert!(!corner.is_adjacent(Position::new(0, 2)));
        assert!(!corner.is_adjacent(Position::new(2, 1)));
        assert!(!corner.is_adjacent(Position::new(2, 2)));
    }

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(1, 1).in_bounds(2));
        assert!(!Position::new(2, 0).in_bounds(2));
        assert!(!Position::new(0, 2).in_bounds(2));
        assert!(!Position::new(0, 0).in_bounds(0));
    }
}
