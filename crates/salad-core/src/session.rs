//! One play-through of a puzzle
//!
//! A [`Session`] owns the puzzle, the selection path, the found set, the
//! timer and the best-time store. Front-ends forward pointer gestures and
//! clock polls to it, then redraw from [`Session::board`].

use crate::matcher::{self, FoundSet};
use crate::path::{PathTracker, TrackerState};
use crate::puzzle::Puzzle;
use crate::share;
use crate::store::{self, BestTimeStore, DEFAULT_NAMESPACE};
use crate::timer::{format_clock, SessionTimer, TickSource, TimerState};
use crate::visibility::{self, BoardView};
use crate::Position;
use serde::Serialize;

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prefix of the best-time storage key
    pub namespace: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Result of reaching the all-words-found state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Elapsed seconds when the last word was found
    pub time_secs: u64,
    /// Best time known before this completion
    pub previous_best: Option<u64>,
    /// Whether this completion set a new best time
    pub new_best: bool,
}

/// Outcome of a gesture that can commit a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Gesture had no effect (no active drag, cell not in play, empty path)
    Ignored,
    /// Path was checked and matched nothing
    NoMatch,
    /// A word was found; `completion` is set when it was the last one
    Found {
        key: String,
        completion: Option<Completion>,
    },
}

impl Evaluation {
    pub fn found_key(&self) -> Option<&str> {
        match self {
            Evaluation::Found { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn completion(&self) -> Option<Completion> {
        match self {
            Evaluation::Found { completion, .. } => *completion,
            _ => None,
        }
    }
}

/// Word list entry for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub key: String,
    /// Number of letters
    pub length: usize,
    pub found: bool,
    /// The word once found, underscores until then
    pub shown: String,
}

/// Game state for one puzzle instance
pub struct Session {
    puzzle: Puzzle,
    tracker: PathTracker,
    found: FoundSet,
    timer: SessionTimer,
    store: Box<dyn BestTimeStore>,
    store_key: String,
    best_time: Option<u64>,
    completion: Option<Completion>,
    hints_used: usize,
    ended: bool,
}

impl Session {
    /// Create a session. The stored best time is read once, here.
    pub fn new(
        puzzle: Puzzle,
        config: SessionConfig,
        clock: Box<dyn TickSource>,
        store: Box<dyn BestTimeStore>,
    ) -> Self {
        let store_key = store::best_time_key(&config.namespace, puzzle.id());
        let best_time = store::load_best_time(store.as_ref(), &store_key);

        tracing::info!(
            puzzle = puzzle.id(),
            words = puzzle.words().len(),
            best = ?best_time,
            "session created"
        );

        Self {
            puzzle,
            tracker: PathTracker::new(),
            found: FoundSet::new(),
            timer: SessionTimer::new(clock),
            store,
            store_key,
            best_time,
            completion: None,
            hints_used: 0,
            ended: false,
        }
    }

    // ==================== Lifecycle ====================

    /// Start the clock
    pub fn start(&mut self) {
        self.timer.start();
        tracing::debug!(puzzle = self.puzzle.id(), "session started");
    }

    /// Stop the clock for good. Also runs on drop.
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.timer.stop();
        tracing::debug!(
            puzzle = self.puzzle.id(),
            elapsed = self.timer.elapsed_secs(),
            completed = self.is_complete(),
            "session ended"
        );
    }

    /// Pull elapsed seconds from the clock. Returns whether the time changed.
    pub fn update_clock(&mut self) -> bool {
        self.timer.poll() > 0
    }

    /// Add one second, for callers that drive their own once-a-second tick
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    // ==================== Gestures ====================

    /// Pointer pressed on a cell: start a drag
    pub fn press(&mut self, pos: Position) -> bool {
        if !self.is_interactive(pos) {
            return false;
        }
        self.tracker.press(pos);
        true
    }

    /// Pointer moved onto a cell during a drag
    pub fn drag_over(&mut self, pos: Position) -> bool {
        if !self.tracker.is_dragging() || !self.is_interactive(pos) {
            return false;
        }
        self.tracker.drag_over(pos)
    }

    /// Pointer released over the board: check the dragged path, then clear it
    pub fn release(&mut self) -> Evaluation {
        match self.tracker.release() {
            Some(path) => self.evaluate(&path),
            None => Evaluation::Ignored,
        }
    }

    /// Pointer released away from the board: drop the path unchecked
    pub fn cancel_drag(&mut self) {
        if self.tracker.is_dragging() {
            self.tracker.clear();
            tracing::debug!("drag cancelled");
        }
    }

    /// Discrete tap on a cell. The path is checked after every change.
    pub fn tap(&mut self, pos: Position) -> Evaluation {
        if !self.is_interactive(pos) {
            return Evaluation::Ignored;
        }
        let effect = self.tracker.tap(pos);
        tracing::trace!(%pos, ?effect, "tap");
        let path = self.tracker.path().to_vec();
        self.evaluate(&path)
    }

    /// Explicit check of the current path. The path is cleared either way.
    pub fn verify(&mut self) -> Evaluation {
        if self.tracker.path().is_empty() {
            return Evaluation::Ignored;
        }
        let path = self.tracker.path().to_vec();
        self.tracker.clear();
        self.evaluate(&path)
    }

    /// Remove the last selected cell
    pub fn backtrack(&mut self) -> Option<Position> {
        self.tracker.backtrack()
    }

    /// Empty the selection
    pub fn clear_selection(&mut self) {
        self.tracker.clear();
    }

    fn is_interactive(&self, pos: Position) -> bool {
        visibility::is_letter_visible(&self.puzzle, &self.found, pos)
    }

    fn evaluate(&mut self, path: &[Position]) -> Evaluation {
        let key = match matcher::find_match(&self.puzzle, path, &self.found) {
            Some(word) => word.key().to_string(),
            None => return Evaluation::NoMatch,
        };

        self.tracker.clear();

        self.found.insert(key.clone());

        tracing::info!(
            puzzle = self.puzzle.id(),
            %key,
            found = self.found.len(),
            total = self.puzzle.words().len(),
            "word found"
        );

        let completion = self.check_completion();
        Evaluation::Found { key, completion }
    }

    /// Fires once, on the transition to every word found
    fn check_completion(&mut self) -> Option<Completion> {
        if self.completion.is_some() || self.found.len() != self.puzzle.words().len() {
            return None;
        }

        self.timer.freeze();
        let time_secs = self.timer.elapsed_secs();
        let previous_best = self.best_time;
        let new_best = previous_best.map_or(true, |best| time_secs < best);

        if new_best {
            self.best_time = Some(time_secs);
            store::save_best_time(self.store.as_mut(), &self.store_key, time_secs);
        }

        let completion = Completion {
            time_secs,
            previous_best,
            new_best,
        };
        self.completion = Some(completion);

        tracing::info!(
            puzzle = self.puzzle.id(),
            time = time_secs,
            ?previous_best,
            new_best,
            "puzzle completed"
        );

        Some(completion)
    }

    // ==================== Hints & sharing ====================

    /// First letter of the first unfound word, in registry order
    pub fn hint(&mut self) -> Option<char> {
        let letter = self
            .puzzle
            .words()
            .iter()
            .find(|word| !self.found.contains(word.key()))
            .and_then(|word| word.first_letter())?;
        self.hints_used += 1;
        Some(letter)
    }

    pub fn share_text(&self) -> String {
        share::share_text(self.puzzle.title(), &self.board(), self.elapsed_secs())
    }

    // ==================== Views ====================

    pub fn board(&self) -> BoardView {
        BoardView::compute(&self.puzzle, &self.found, self.tracker.path())
    }

    /// Words sorted by display string, masked until found
    pub fn word_list(&self) -> Vec<WordEntry> {
        let mut words: Vec<_> = self.puzzle.words().iter().collect();
        words.sort_by(|a, b| a.display().cmp(b.display()).then_with(|| a.key().cmp(b.key())));
        words
            .into_iter()
            .map(|word| {
                let found = self.found.contains(word.key());
                let length = word.display().chars().count();
                WordEntry {
                    key: word.key().to_string(),
                    length,
                    found,
                    shown: if found {
                        word.display().to_string()
                    } else {
                        "_".repeat(length)
                    },
                }
            })
            .collect()
    }

    /// Letters along the current selection
    pub fn selection_letters(&self) -> String {
        self.puzzle
            .grid()
            .spell(self.tracker.path())
            .unwrap_or_default()
    }

    pub fn selection(&self) -> &[Position] {
        self.tracker.path()
    }

    pub fn tracker_state(&self) -> TrackerState {
        self.tracker.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn found(&self) -> &FoundSet {
        &self.found
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn total_words(&self) -> usize {
        self.puzzle.words().len()
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    /// Elapsed time as `M:SS`
    pub fn elapsed_string(&self) -> String {
        format_clock(self.elapsed_secs())
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn best_time(&self) -> Option<u64> {
        self.best_time
    }

    /// Best time as `M:SS`, or `N/A`
    pub fn best_time_string(&self) -> String {
        self.best_time
            .map(format_clock)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn store_key(&self) -> &str {
        &self.store_key
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.end();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("puzzle", &self.puzzle.id())
            .field("selection", &self.tracker.path())
            .field("found", &self.found)
            .field("timer", &self.timer)
            .field("best_time", &self.best_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBestTimeStore;
    use crate::timer::ManualClock;

    const MINI: &str = r#"{"id":"mini","title":"Mini","size":2,"grid":"AB\nCD",
        "words":[
            {"key":"w1","display":"AB","path":[[0,0],[0,1]]},
            {"key":"w2","display":"AC","path":[[0,0],[1,0]]}
        ]}"#;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn session() -> (Session, ManualClock, MemoryBestTimeStore) {
        let clock = ManualClock::new();
        let store = MemoryBestTimeStore::new();
        let mut session = Session::new(
            Puzzle::from_json(MINI).unwrap(),
            SessionConfig::default(),
            Box::new(clock.clone()),
            Box::new(store.clone()),
        );
        session.start();
        (session, clock, store)
    }

    #[test]
    fn test_new_session_state() {
        let (session, _, _) = session();
        assert_eq!(session.found_count(), 0);
        assert_eq!(session.total_words(), 2);
        assert_eq!(session.tracker_state(), TrackerState::Idle);
        assert_eq!(session.timer_state(), TimerState::Running);
        assert_eq!(session.best_time(), None);
        assert_eq!(session.best_time_string(), "N/A");
        assert_eq!(session.store_key(), "newsalad-mini");
        assert!(!session.is_complete());
    }

    #[test]
    fn test_drag_release_finds_word() {
        let (mut session, _, _) = session();
        assert!(session.press(p(0, 0)));
        assert!(session.drag_over(p(0, 1)));
        assert_eq!(session.selection_letters(), "AB");

        let result = session.release();
        assert_eq!(result.found_key(), Some("w1"));
        assert!(session.found().contains("w1"));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_non_matching_release_clears_path() {
        let (mut session, _, _) = session();
        session.press(p(0, 1));
        session.drag_over(p(0, 0));
        assert_eq!(session.release(), Evaluation::NoMatch);
        assert!(session.selection().is_empty());
        assert_eq!(session.found_count(), 0);
    }

    #[test]
    fn test_retracing_found_word_is_no_match() {
        // w1's cells stay visible because w3 still covers them
        let json = r#"{"id":"overlap","title":"Overlap","size":2,"grid":"AB\nCD",
            "words":[
                {"key":"w1","display":"AB","path":[[0,0],[0,1]]},
                {"key":"w3","display":"ABD","path":[[0,0],[0,1],[1,1]]}
            ]}"#;
        let mut session = Session::new(
            Puzzle::from_json(json).unwrap(),
            SessionConfig::default(),
            Box::new(ManualClock::new()),
            Box::new(MemoryBestTimeStore::new()),
        );
        session.start();

        session.press(p(0, 0));
        session.drag_over(p(0, 1));
        assert_eq!(session.release().found_key(), Some("w1"));

        assert!(session.press(p(0, 0)));
        assert!(session.drag_over(p(0, 1)));
        assert_eq!(session.release(), Evaluation::NoMatch);
        assert_eq!(session.found_count(), 1);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_release_without_drag_is_ignored() {
        let (mut session, _, _) = session();
        assert_eq!(session.release(), Evaluation::Ignored);
    }

    #[test]
    fn test_cancel_drag_skips_evaluation() {
        let (mut session, _, _) = session();
        session.press(p(0, 0));
        session.drag_over(p(0, 1));
        session.cancel_drag();
        assert!(session.selection().is_empty());
        assert_eq!(session.found_count(), 0);
        assert_eq!(session.release(), Evaluation::Ignored);
    }

    #[test]
    fn test_tap_matches_mid_sequence() {
        let (mut session, _, _) = session();
        assert_eq!(session.tap(p(0, 0)), Evaluation::NoMatch);
        assert_eq!(session.selection(), &[p(0, 0)]);
        let result = session.tap(p(1, 0));
        assert_eq!(result.found_key(), Some("w2"));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_tap_non_match_keeps_path() {
        let (mut session, _, _) = session();
        session.tap(p(0, 1));
        session.tap(p(0, 0));
        assert_eq!(session.selection(), &[p(0, 1), p(0, 0)]);
    }

    #[test]
    fn test_gestures_on_background_are_ignored() {
        let (mut session, _, _) = session();
        // (1,1) belongs to no word
        assert!(!session.press(p(1, 1)));
        assert_eq!(session.tap(p(1, 1)), Evaluation::Ignored);
        assert_eq!(session.tap(p(9, 9)), Evaluation::Ignored);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_hidden_cells_stop_accepting_gestures() {
        let (mut session, _, _) = session();
        session.tap(p(0, 0));
        session.tap(p(0, 1));
        assert!(session.found().contains("w1"));

        // (0,1) was only on w1's path
        assert_eq!(session.tap(p(0, 1)), Evaluation::Ignored);
        // (0,0) is still needed by w2
        assert_eq!(session.tap(p(0, 0)), Evaluation::NoMatch);
    }

    #[test]
    fn test_verify_clears_path() {
        let (mut session, _, _) = session();
        assert_eq!(session.verify(), Evaluation::Ignored);
        session.tap(p(1, 0));
        assert_eq!(session.verify(), Evaluation::NoMatch);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_completion_records_best_time() {
        let (mut session, clock, store) = session();
        clock.advance(45);
        session.update_clock();

        session.tap(p(0, 0));
        assert_eq!(session.tap(p(0, 1)).completion(), None);
        session.tap(p(0, 0));
        let result = session.tap(p(1, 0));

        let completion = result.completion().unwrap();
        assert_eq!(completion.time_secs, 45);
        assert_eq!(completion.previous_best, None);
        assert!(completion.new_best);
        assert!(session.is_complete());
        assert_eq!(session.best_time(), Some(45));
        assert_eq!(store.peek("newsalad-mini").as_deref(), Some("45"));
    }

    #[test]
    fn test_timer_freezes_on_completion() {
        let (mut session, clock, _) = session();
        clock.advance(10);
        session.tap(p(0, 0));
        session.tap(p(0, 1));
        session.tap(p(0, 0));
        session.tap(p(1, 0));
        assert_eq!(session.elapsed_secs(), 10);
        assert_eq!(session.timer_state(), TimerState::Frozen);

        clock.advance(30);
        session.update_clock();
        session.tick();
        assert_eq!(session.elapsed_secs(), 10);
        assert_eq!(session.elapsed_string(), "0:10");
    }

    #[test]
    fn test_hint_follows_registry_order() {
        let (mut session, _, _) = session();
        assert_eq!(session.hint(), Some('A'));
        assert_eq!(session.hints_used(), 1);
        session.tap(p(0, 0));
        session.tap(p(0, 1));
        session.tap(p(0, 0));
        session.tap(p(1, 0));
        assert_eq!(session.hint(), None);
        assert_eq!(session.hints_used(), 1);
    }

    #[test]
    fn test_word_list_sorted_and_masked() {
        let (mut session, _, _) = session();
        session.tap(p(0, 0));
        session.tap(p(1, 0));

        let list = session.word_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].key, "w1");
        assert_eq!(list[0].shown, "__");
        assert!(!list[0].found);
        assert_eq!(list[1].key, "w2");
        assert_eq!(list[1].shown, "AC");
        assert_eq!(list[1].length, 2);
        assert!(list[1].found);
    }

    #[test]
    fn test_end_stops_timer() {
        let (mut session, clock, _) = session();
        clock.advance(3);
        session.update_clock();
        session.end();
        clock.advance(3);
        session.update_clock();
        assert_eq!(session.elapsed_secs(), 3);
        assert_eq!(session.timer_state(), TimerState::Stopped);
    }
}
