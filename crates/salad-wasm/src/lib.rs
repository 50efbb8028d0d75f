//! WebAssembly bindings for New Salad
//!
//! The page renders the grid itself: it forwards pointer and key events to
//! [`WordSaladGame`] and redraws from the JSON-like views it returns.

use salad_core::{BestTimeStore, MemoryBestTimeStore, Position, Puzzle, DEFAULT_NAMESPACE};
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod browser;
mod game;

#[cfg(test)]
mod tests;

pub use browser::{LocalStorageStore, PerformanceClock};
pub use game::{EvaluationView, GameState, StateView};

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// localStorage when the page allows it, otherwise a store that lives as
/// long as the game
fn open_store() -> Box<dyn BestTimeStore> {
    match LocalStorageStore::from_window() {
        Ok(store) => Box::new(store),
        Err(err) => {
            web_sys::console::warn_1(&format!("best times will not be saved: {}", err).into());
            Box::new(MemoryBestTimeStore::new())
        }
    }
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct WordSaladGame {
    state: GameState,
}

#[wasm_bindgen]
impl WordSaladGame {
    /// Create a game from puzzle JSON, with best times under `newsalad-<id>`
    #[wasm_bindgen(constructor)]
    pub fn new(puzzle_json: &str) -> Result<WordSaladGame, JsValue> {
        Self::with_namespace(puzzle_json, DEFAULT_NAMESPACE)
    }

    /// Create a game whose best time is stored under `<namespace>-<id>`
    #[wasm_bindgen]
    pub fn with_namespace(puzzle_json: &str, namespace: &str) -> Result<WordSaladGame, JsValue> {
        let puzzle = Puzzle::from_json(puzzle_json)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        let state = GameState::new(
            puzzle,
            namespace,
            Box::new(PerformanceClock::new()),
            open_store(),
        );
        Ok(WordSaladGame { state })
    }

    /// Advance the clock (call from requestAnimationFrame or a timer)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.state.tick();
    }

    // ==================== Pointer ====================

    /// Pointer pressed on a cell
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, row: usize, col: usize) -> bool {
        self.state.pointer_down(Position::new(row, col))
    }

    /// Pointer entered a cell while pressed
    #[wasm_bindgen]
    pub fn pointer_enter(&mut self, row: usize, col: usize) -> bool {
        self.state.pointer_enter(Position::new(row, col))
    }

    /// Pointer released over the grid
    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> JsValue {
        to_js(&self.state.pointer_up())
    }

    /// Pointer released outside the grid
    #[wasm_bindgen]
    pub fn pointer_cancel(&mut self) {
        self.state.pointer_cancel();
    }

    /// Click without drag
    #[wasm_bindgen]
    pub fn tap(&mut self, row: usize, col: usize) -> JsValue {
        to_js(&self.state.tap(Position::new(row, col)))
    }

    #[wasm_bindgen]
    pub fn verify(&mut self) -> JsValue {
        to_js(&self.state.verify())
    }

    #[wasm_bindgen]
    pub fn backtrack(&mut self) -> bool {
        self.state.backtrack()
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    /// Handle keyboard input by `KeyboardEvent.key`
    #[wasm_bindgen]
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.state.handle_key(key)
    }

    // ==================== Queries ====================

    /// Full snapshot for rendering
    #[wasm_bindgen]
    pub fn state(&self) -> JsValue {
        to_js(&self.state.view())
    }

    /// Get current state as JSON
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.state.view()).unwrap_or_default()
    }

    /// Per-cell reveal state, row-major
    #[wasm_bindgen]
    pub fn cells(&self) -> JsValue {
        to_js(&self.state.board().cells())
    }

    /// Sorted, masked word list
    #[wasm_bindgen]
    pub fn words(&self) -> JsValue {
        to_js(&self.state.session().word_list())
    }

    /// Letters along the current selection
    #[wasm_bindgen]
    pub fn selection_letters(&self) -> String {
        self.state.session().selection_letters()
    }

    /// First letter of an unfound word
    #[wasm_bindgen]
    pub fn hint(&mut self) -> Option<String> {
        self.state.hint().map(String::from)
    }

    #[wasm_bindgen]
    pub fn hints_used(&self) -> usize {
        self.state.session().hints_used()
    }

    /// Result summary for sharing; the page does the clipboard work
    #[wasm_bindgen]
    pub fn share_text(&self) -> String {
        self.state.session().share_text()
    }

    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.state.session().is_complete()
    }

    /// Get elapsed time in seconds
    #[wasm_bindgen]
    pub fn elapsed_secs(&self) -> u32 {
        u32::try_from(self.state.session().elapsed_secs()).unwrap_or(u32::MAX)
    }

    /// Get formatted elapsed time
    #[wasm_bindgen]
    pub fn elapsed_string(&self) -> String {
        self.state.session().elapsed_string()
    }

    #[wasm_bindgen]
    pub fn best_time_secs(&self) -> Option<u32> {
        self.state
            .session()
            .best_time()
            .map(|secs| u32::try_from(secs).unwrap_or(u32::MAX))
    }

    /// Best time as `M:SS`, or `N/A`
    #[wasm_bindgen]
    pub fn best_time_string(&self) -> String {
        self.state.session().best_time_string()
    }

    #[wasm_bindgen]
    pub fn found_count(&self) -> usize {
        self.state.session().found_count()
    }

    #[wasm_bindgen]
    pub fn total_words(&self) -> usize {
        self.state.session().total_words()
    }

    #[wasm_bindgen]
    pub fn title(&self) -> String {
        self.state.session().puzzle().title().to_string()
    }

    #[wasm_bindgen]
    pub fn size(&self) -> usize {
        self.state.session().puzzle().size()
    }

    /// Stop the clock; the game stays readable
    #[wasm_bindgen]
    pub fn end(&mut self) {
        self.state.end();
    }
}
