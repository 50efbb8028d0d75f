//! Shareable result summary: one emoji per cell and the solve time

use crate::timer::format_clock;
use crate::visibility::BoardView;
use std::fmt::Write;

/// Name printed at the top of shared results
pub const APP_NAME: &str = "New Salad";
/// Glyph for a cell on a found word's path
pub const FOUND_GLYPH: char = '🟢';
/// Glyph for every other cell
pub const OTHER_GLYPH: char = '⚪';

/// Build the shareable result summary: title line, one glyph per cell in
/// row-major order with a line break after each row, then the time.
pub fn share_text(title: &str, board: &BoardView, elapsed_secs: u64) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{} - {}", APP_NAME, title);
    for row in board.rows() {
        for cell in row {
            text.push(if cell.in_found_path { FOUND_GLYPH } else { OTHER_GLYPH });
        }
        text.push('\n');
    }
    let _ = write!(text, "Time: {}", format_clock(elapsed_secs));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::FoundSet;
    use crate::puzzle::Puzzle;

    #[test]
    fn test_share_text_layout() {
        let puzzle = Puzzle::from_json(
            r#"{"id":"s","title":"Tiny","size":2,"grid":"AB\nCD",
                "words":[{"key":"w1","display":"AB","path":[[0,0],[0,1]]}]}"#,
        )
        .unwrap();
        let found: FoundSet = ["w1".to_string()].into_iter().collect();
        let board = BoardView::compute(&puzzle, &found, &[]);

        assert_eq!(share_text("Tiny", &board, 83), "New Salad - Tiny\n🟢🟢\n⚪⚪\nTime: 1:23");
    }

    #[test]
    fn test_share_text_nothing_found() {
        let puzzle = Puzzle::from_json(
            r#"{"id":"s","title":"One","size":1,"grid":"A",
                "words":[{"key":"a","display":"A","path":[[0,0]]}]}"#,
        )
        .unwrap();
        let board = BoardView::compute(&puzzle, &FoundSet::new(), &[]);
        assert_eq!(share_text("One", &board, 9), "New Salad - One\n⚪\nTime: 0:09");
    }
}
