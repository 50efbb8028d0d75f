use crate::config::StartPoint;
use crate::layout::GridLayout;
use crate::library::{Library, LibraryError};
use crate::storage::StoreBackend;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use salad_core::{
    format_clock, Completion, Evaluation, Position, Session, SessionConfig, WallClock,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Ticks a message stays on screen (~3 seconds at 100ms)
const MESSAGE_TICKS: u32 = 30;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Puzzle list
    Catalog,
    /// Normal gameplay
    Playing,
}

/// The main application state
pub struct App {
    /// Where puzzles come from
    pub library: Library,
    /// Sorted puzzle ids
    pub catalog: Vec<String>,
    /// Highlighted catalog row
    pub catalog_selection: usize,
    /// Puzzle being played
    pub session: Option<Session>,
    /// Keyboard cursor
    pub cursor: Position,
    /// Current screen state
    pub screen: Screen,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Grid geometry from the last render, for mouse hit-testing
    pub layout: Option<GridLayout>,
    /// Best-time backend handed to each session
    store: StoreBackend,
    /// Best-time key prefix
    namespace: String,
    /// Directory share files are written to
    share_dir: PathBuf,
}

impl App {
    pub fn new(
        library: Library,
        store: StoreBackend,
        namespace: impl Into<String>,
        share_dir: impl Into<PathBuf>,
    ) -> Self {
        let mut app = Self {
            library,
            catalog: Vec::new(),
            catalog_selection: 0,
            session: None,
            cursor: Position::new(0, 0),
            screen: Screen::Catalog,
            theme: Theme::dark(),
            message: None,
            message_timer: 0,
            layout: None,
            store,
            namespace: namespace.into(),
            share_dir: share_dir.into(),
        };
        app.refresh_catalog();
        app
    }

    /// Open the first screen. Fails when the requested puzzle cannot be loaded.
    pub fn start(&mut self, start: &StartPoint) -> Result<(), LibraryError> {
        match start {
            StartPoint::Catalog => {
                self.screen = Screen::Catalog;
                Ok(())
            }
            StartPoint::Puzzle(id) => self.open(id),
            StartPoint::Daily => self.open_daily(),
            StartPoint::Random => self.open_random(),
        }
    }

    /// Fixed redraw/poll cadence
    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update message and clock (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if let Some(session) = self.session.as_mut() {
            session.update_clock();
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = MESSAGE_TICKS;
    }

    // ==================== Puzzle selection ====================

    pub fn refresh_catalog(&mut self) {
        match self.library.ids() {
            Ok(ids) => self.catalog = ids,
            Err(err) => {
                tracing::warn!(%err, "catalog unavailable");
                self.catalog.clear();
                self.show_message(&err.to_string());
            }
        }
        self.catalog_selection = self
            .catalog_selection
            .min(self.catalog.len().saturating_sub(1));
    }

    /// Load a puzzle and start a fresh session on it
    pub fn open(&mut self, id: &str) -> Result<(), LibraryError> {
        let puzzle = self.library.load(id)?;
        let mut session = Session::new(
            puzzle,
            SessionConfig {
                namespace: self.namespace.clone(),
            },
            Box::new(WallClock::new()),
            self.store.open(),
        );
        session.start();

        self.cursor = session
            .board()
            .cells()
            .iter()
            .find(|cell| cell.is_interactive())
            .map(|cell| cell.position())
            .unwrap_or(Position::new(0, 0));
        if let Some(index) = self.catalog.iter().position(|c| c == id) {
            self.catalog_selection = index;
        }
        self.session = Some(session);
        self.screen = Screen::Playing;

        tracing::info!(puzzle = id, backend = self.store.name(), "puzzle opened");
        Ok(())
    }

    pub fn open_daily(&mut self) -> Result<(), LibraryError> {
        let id = self.library.daily_id(chrono::Local::now().date_naive())?;
        self.open(&id)
    }

    pub fn open_random(&mut self) -> Result<(), LibraryError> {
        let id = self.library.random_id(&mut rand::thread_rng())?;
        self.open(&id)
    }

    fn open_or_report(&mut self, result: Result<(), LibraryError>) {
        if let Err(err) = result {
            tracing::warn!(%err, "could not open puzzle");
            self.show_message(&err.to_string());
        }
    }

    // ==================== Keyboard ====================

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            Screen::Catalog => self.handle_catalog_key(key),
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => {
                if self.session.is_some() {
                    self.screen = Screen::Playing;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.catalog_selection = self.catalog_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.catalog.len().saturating_sub(1);
                self.catalog_selection = (self.catalog_selection + 1).min(max);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.catalog.get(self.catalog_selection).cloned() {
                    let result = self.open(&id);
                    self.open_or_report(result);
                }
            }
            KeyCode::Char('d') => {
                let result = self.open_daily();
                self.open_or_report(result);
            }
            KeyCode::Char('r') => {
                let result = self.open_random();
                self.open_or_report(result);
            }
            KeyCode::Char('t') => self.theme = self.theme.next(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Selection
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cursor = self.cursor;
                if let Some(result) = self.session.as_mut().map(|s| s.tap(cursor)) {
                    self.report(&result);
                }
            }
            KeyCode::Backspace => {
                if let Some(session) = self.session.as_mut() {
                    session.backtrack();
                }
            }
            KeyCode::Esc | KeyCode::Char('x') => {
                if let Some(session) = self.session.as_mut() {
                    session.clear_selection();
                }
            }
            KeyCode::Char('v') => {
                if let Some(result) = self.session.as_mut().map(|s| s.verify()) {
                    if result == Evaluation::NoMatch {
                        self.show_message("Not a word");
                    }
                    self.report(&result);
                }
            }

            // Hint
            KeyCode::Char('?') => {
                match self.session.as_mut().and_then(|s| s.hint()) {
                    Some(letter) => self.show_message(&format!("Hint: a word starts with {}", letter)),
                    None => self.show_message("No hint available"),
                }
            }

            // Share
            KeyCode::Char('s') => self.share(),

            // Restart
            KeyCode::Char('n') => {
                if let Some(id) = self.session.as_ref().map(|s| s.puzzle().id().to_string()) {
                    match self.open(&id) {
                        Ok(()) => self.show_message("Restarted"),
                        Err(err) => self.open_or_report(Err(err)),
                    }
                }
            }

            // Other puzzles
            KeyCode::Char('c') => {
                self.refresh_catalog();
                self.screen = Screen::Catalog;
            }
            KeyCode::Char('d') => {
                let result = self.open_daily();
                self.open_or_report(result);
            }
            KeyCode::Char('r') => {
                let result = self.open_random();
                self.open_or_report(result);
            }

            // Theme toggle
            KeyCode::Char('t') => self.theme = self.theme.next(),

            _ => {}
        }

        AppAction::Continue
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let max = session.puzzle().size().saturating_sub(1) as i32;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(new_row, new_col);
    }

    // ==================== Mouse ====================

    /// Drag gestures on the grid
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.screen != Screen::Playing {
            return;
        }
        let (Some(layout), Some(session)) = (self.layout, self.session.as_mut()) else {
            return;
        };
        let target = layout.cell_at(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(pos) = target {
                    if session.press(pos) {
                        self.cursor = pos;
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(pos) = target {
                    if session.drag_over(pos) {
                        self.cursor = pos;
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if layout.contains(event.column, event.row) {
                    let result = session.release();
                    self.report(&result);
                } else {
                    session.cancel_drag();
                }
            }
            _ => {}
        }
    }

    // ==================== Feedback ====================

    fn report(&mut self, result: &Evaluation) {
        let Evaluation::Found { key, completion } = result else {
            return;
        };
        match completion {
            Some(completion) => {
                let msg = completion_message(completion);
                self.show_message(&msg);
            }
            None => {
                let display = self
                    .session
                    .as_ref()
                    .and_then(|s| s.puzzle().word(key))
                    .map(|w| w.display().to_string())
                    .unwrap_or_else(|| key.clone());
                self.show_message(&format!("Found {}!", display));
            }
        }
    }

    /// Write the share text next to the best-time file
    fn share(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_complete() {
            self.show_message("Finish the puzzle to share your result");
            return;
        }

        let text = session.share_text();
        let path = share_path(&self.share_dir, session.puzzle().id());
        match std::fs::write(&path, text) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "share text written");
                self.show_message(&format!("Result saved to {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not write share text");
                self.show_message(&format!("Could not save result: {}", err));
            }
        }
    }
}

/// File the share text of a puzzle is written to
pub fn share_path(dir: &Path, puzzle_id: &str) -> PathBuf {
    dir.join(format!("newsalad-{}-share.txt", puzzle_id))
}

/// Banner text for a finished puzzle
pub fn completion_message(completion: &Completion) -> String {
    let time = format_clock(completion.time_secs);
    match (completion.new_best, completion.previous_best) {
        (true, Some(previous)) => format!(
            "Solved in {}! New best (was {})",
            time,
            format_clock(previous)
        ),
        (true, None) => format!("Solved in {}! New best", time),
        (false, Some(best)) => format!("Solved in {} (best {})", time, format_clock(best)),
        (false, None) => format!("Solved in {}", time),
    }
}
