//! Screen geometry of the letter grid, shared by the renderer and mouse
//! hit-testing
//!
//! ```text
//! +---+---+
//! | A | B |
//! +---+---+
//! | C | D |
//! +---+---+
//! ```

use salad_core::Position;

/// Columns per cell, including its left border
pub const CELL_WIDTH: u16 = 4;
/// Rows per cell, including its top border
pub const CELL_HEIGHT: u16 = 2;
/// Width reserved right of the grid for the info panel
pub const INFO_PANEL_WIDTH: u16 = 30;
/// Gap between grid and info panel
pub const PANEL_GAP: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Column of the top-left border corner
    pub x: u16,
    /// Row of the top-left border corner
    pub y: u16,
    pub size: usize,
}

impl GridLayout {
    /// Grid placed left of the info panel, both centered as a block
    pub fn centered(size: usize, term_width: u16, term_height: u16) -> Self {
        let probe = Self { x: 0, y: 0, size };
        let total_width = probe.width() + PANEL_GAP + INFO_PANEL_WIDTH;
        let x = if term_width > total_width {
            (term_width - total_width) / 2
        } else {
            1
        };
        let y = if term_height > probe.height() + 12 { 2 } else { 1 };
        Self { x, y, size }
    }

    pub fn width(&self) -> u16 {
        self.size as u16 * CELL_WIDTH + 1
    }

    pub fn height(&self) -> u16 {
        self.size as u16 * CELL_HEIGHT + 1
    }

    /// Screen coordinates of the letter inside a cell
    pub fn letter_at(&self, pos: Position) -> (u16, u16) {
        (
            self.x + pos.col as u16 * CELL_WIDTH + 2,
            self.y + pos.row as u16 * CELL_HEIGHT + 1,
        )
    }

    /// Whether a screen point falls anywhere on the grid, borders included
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && column < self.x + self.width()
            && row < self.y + self.height()
    }

    /// Cell under a screen point. Borders belong to no cell.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        if !self.contains(column, row) {
            return None;
        }
        let dx = column - self.x;
        let dy = row - self.y;
        if dx % CELL_WIDTH == 0 || dy % CELL_HEIGHT == 0 {
            return None;
        }
        let pos = Position::new((dy / CELL_HEIGHT) as usize, (dx / CELL_WIDTH) as usize);
        pos.in_bounds(self.size).then_some(pos)
    }
}
