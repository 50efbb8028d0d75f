//! Game state behind the JS bindings, free of browser types so it can be
//! driven from tests

use salad_core::{
    BestTimeStore, BoardView, CellView, Completion, Evaluation, Position, Puzzle, Session,
    SessionConfig, TickSource, WordEntry,
};
use serde::Serialize;

/// Ticks a message stays visible at 60 calls per second
const MESSAGE_TICKS: u32 = 180;

/// Gesture outcome as seen by JS
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationView {
    /// `ignored`, `no_match` or `found`
    pub outcome: &'static str,
    pub key: Option<String>,
    pub completion: Option<Completion>,
}

impl From<Evaluation> for EvaluationView {
    fn from(evaluation: Evaluation) -> Self {
        match evaluation {
            Evaluation::Ignored => Self {
                outcome: "ignored",
                key: None,
                completion: None,
            },
            Evaluation::NoMatch => Self {
                outcome: "no_match",
                key: None,
                completion: None,
            },
            Evaluation::Found { key, completion } => Self {
                outcome: "found",
                key: Some(key),
                completion,
            },
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub size: usize,
    pub cells: Vec<CellView>,
    pub words: Vec<WordEntry>,
    pub selection: String,
    pub cursor: [usize; 2],
    pub elapsed: String,
    pub best: String,
    pub found: usize,
    pub total: usize,
    pub hints_used: usize,
    pub complete: bool,
    pub message: Option<String>,
}

pub struct GameState {
    session: Session,
    cursor: Position,
    message: Option<String>,
    message_timer: u32,
}

impl GameState {
    pub fn new(
        puzzle: Puzzle,
        namespace: &str,
        clock: Box<dyn TickSource>,
        store: Box<dyn BestTimeStore>,
    ) -> Self {
        let config = SessionConfig {
            namespace: namespace.to_string(),
        };
        let mut session = Session::new(puzzle, config, clock, store);
        session.start();

        let cursor = session
            .board()
            .cells()
            .iter()
            .find(|c| c.is_interactive())
            .map(|c| c.position())
            .unwrap_or(Position::new(0, 0));

        Self {
            session,
            cursor,
            message: None,
            message_timer: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Update clock and message (called each frame)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        self.session.update_clock();
    }

    fn show_message(&mut self, msg: String) {
        self.message = Some(msg);
        self.message_timer = MESSAGE_TICKS;
    }

    // ==================== Pointer ====================

    pub fn pointer_down(&mut self, pos: Position) -> bool {
        let accepted = self.session.press(pos);
        if accepted {
            self.cursor = pos;
        }
        accepted
    }

    pub fn pointer_enter(&mut self, pos: Position) -> bool {
        let accepted = self.session.drag_over(pos);
        if accepted {
            self.cursor = pos;
        }
        accepted
    }

    pub fn pointer_up(&mut self) -> EvaluationView {
        let result = self.session.release();
        self.announce(&result);
        result.into()
    }

    pub fn pointer_cancel(&mut self) {
        self.session.cancel_drag();
    }

    pub fn tap(&mut self, pos: Position) -> EvaluationView {
        let result = self.session.tap(pos);
        if result != Evaluation::Ignored {
            self.cursor = pos;
        }
        self.announce(&result);
        result.into()
    }

    pub fn verify(&mut self) -> EvaluationView {
        let result = self.session.verify();
        if result == Evaluation::NoMatch {
            self.show_message("Not a word".to_string());
        }
        self.announce(&result);
        result.into()
    }

    pub fn backtrack(&mut self) -> bool {
        self.session.backtrack().is_some()
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn hint(&mut self) -> Option<char> {
        let letter = self.session.hint();
        match letter {
            Some(letter) => self.show_message(format!("Hint: a word starts with {}", letter)),
            None => self.show_message("No hint available".to_string()),
        }
        letter
    }

    // ==================== Keyboard ====================

    /// Handle a key by its `KeyboardEvent.key` name. Returns false for keys
    /// the game does not use.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "ArrowUp" | "k" => self.move_cursor(-1, 0),
            "ArrowDown" | "j" => self.move_cursor(1, 0),
            "ArrowLeft" | "h" => self.move_cursor(0, -1),
            "ArrowRight" | "l" => self.move_cursor(0, 1),
            " " | "Enter" => {
                let cursor = self.cursor;
                self.tap(cursor);
            }
            "Backspace" => {
                self.backtrack();
            }
            "Escape" | "x" => self.clear_selection(),
            "v" => {
                self.verify();
            }
            "?" => {
                self.hint();
            }
            _ => return false,
        }
        true
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = self.session.puzzle().size().saturating_sub(1) as i32;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(new_row, new_col);
    }

    fn announce(&mut self, result: &Evaluation) {
        let Evaluation::Found { key, completion } = result else {
            return;
        };
        let msg = match completion {
            Some(c) if c.new_best => format!("Solved in {}! New best", self.session.elapsed_string()),
            Some(_) => format!(
                "Solved in {} (best {})",
                self.session.elapsed_string(),
                self.session.best_time_string()
            ),
            None => {
                let display = self
                    .session
                    .puzzle()
                    .word(key)
                    .map(|w| w.display().to_string())
                    .unwrap_or_else(|| key.clone());
                format!("Found {}!", display)
            }
        };
        self.show_message(msg);
    }

    // ==================== Views ====================

    pub fn board(&self) -> BoardView {
        self.session.board()
    }

    pub fn view(&self) -> StateView {
        let session = &self.session;
        let puzzle = session.puzzle();
        StateView {
            id: puzzle.id().to_string(),
            title: puzzle.title().to_string(),
            theme: puzzle.theme().to_string(),
            size: puzzle.size(),
            cells: session.board().cells().to_vec(),
            words: session.word_list(),
            selection: session.selection_letters(),
            cursor: [self.cursor.row, self.cursor.col],
            elapsed: session.elapsed_string(),
            best: session.best_time_string(),
            found: session.found_count(),
            total: session.total_words(),
            hints_used: session.hints_used(),
            complete: session.is_complete(),
            message: self.message.clone(),
        }
    }

    /// Stop the clock for good
    pub fn end(&mut self) {
        self.session.end();
    }
}
