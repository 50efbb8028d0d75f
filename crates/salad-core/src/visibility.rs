//! Per-cell reveal state derived from found words and the current selection

use crate::matcher::FoundSet;
use crate::puzzle::Puzzle;
use crate::Position;
use serde::Serialize;

/// How a cell should be drawn, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    /// Part of the in-progress selection
    Selecting,
    /// On the path of a found word
    Found,
    /// Letter in play, not selected
    Plain,
    /// Letter no longer (or never) in play
    Blank,
}

/// Reveal state of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    /// Covered by the path of at least one unfound word
    pub letter_visible: bool,
    /// Covered by the path of at least one found word
    pub in_found_path: bool,
    /// Part of the current selection
    pub selecting: bool,
}

impl CellView {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Only cells whose letter is in play accept gestures
    pub fn is_interactive(&self) -> bool {
        self.letter_visible
    }

    pub fn style(&self) -> CellStyle {
        if self.selecting {
            CellStyle::Selecting
        } else if self.in_found_path {
            CellStyle::Found
        } else if self.letter_visible {
            CellStyle::Plain
        } else {
            CellStyle::Blank
        }
    }

    /// The letter to show, if any
    pub fn shown_letter(&self) -> Option<char> {
        self.letter_visible.then_some(self.letter)
    }
}

/// Reveal state of the whole grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    size: usize,
    cells: Vec<CellView>,
}

impl BoardView {
    /// Recompute the board from scratch
    pub fn compute(puzzle: &Puzzle, found: &FoundSet, selection: &[Position]) -> Self {
        let size = puzzle.size();
        let mut cells: Vec<CellView> = puzzle
            .grid()
            .positions()
            .map(|pos| CellView {
                row: pos.row,
                col: pos.col,
                letter: puzzle.grid().letter_at(pos).unwrap_or(' '),
                letter_visible: false,
                in_found_path: false,
                selecting: false,
            })
            .collect();

        for word in puzzle.words() {
            let is_found = found.contains(word.key());
            for pos in word.path() {
                if let Some(cell) = cells.get_mut(pos.row * size + pos.col) {
                    if is_found {
                        cell.in_found_path = true;
                    } else {
                        cell.letter_visible = true;
                    }
                }
            }
        }

        for pos in selection {
            if pos.in_bounds(size) {
                cells[pos.row * size + pos.col].selecting = true;
            }
        }

        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Option<&CellView> {
        if pos.in_bounds(self.size) {
            self.cells.get(pos.row * self.size + pos.col)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Number of cells whose letter is still in play
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.letter_visible).count()
    }
}

/// Whether a single cell is still in play, without building a whole board
pub fn is_letter_visible(puzzle: &Puzzle, found: &FoundSet, pos: Position) -> bool {
    puzzle
        .words()
        .iter()
        .any(|word| !found.contains(word.key()) && word.covers(pos))
}
