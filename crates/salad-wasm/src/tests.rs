//! Tests for the game state behind the bindings

use crate::game::GameState;
use salad_core::{ManualClock, MemoryBestTimeStore, Position, Puzzle};

const FRUTAS: &str = include_str!("../../../data/puzzles/frutas-001.json");

fn game() -> (GameState, ManualClock, MemoryBestTimeStore) {
    let clock = ManualClock::new();
    let store = MemoryBestTimeStore::new();
    let state = GameState::new(
        Puzzle::from_json(FRUTAS).unwrap(),
        "newsalad",
        Box::new(clock.clone()),
        Box::new(store.clone()),
    );
    (state, clock, store)
}

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn drag(state: &mut GameState, path: &[Position]) -> &'static str {
    state.pointer_down(path[0]);
    for pos in &path[1..] {
        state.pointer_enter(*pos);
    }
    state.pointer_up().outcome
}

#[test]
fn test_game_state_new() {
    let (state, _, _) = game();
    let view = state.view();
    assert_eq!(view.id, "frutas-001");
    assert_eq!(view.size, 4);
    assert_eq!(view.cells.len(), 16);
    assert_eq!(view.found, 0);
    assert_eq!(view.total, 4);
    assert_eq!(view.elapsed, "0:00");
    assert_eq!(view.best, "N/A");
    assert!(!view.complete);
    assert_eq!(state.cursor(), p(0, 0));
}

#[test]
fn test_pointer_drag_finds_word() {
    let (mut state, _, _) = game();
    assert_eq!(drag(&mut state, &[p(0, 0), p(0, 1), p(0, 2)]), "found");
    assert_eq!(state.message(), Some("Found UVA!"));
    assert!(state.session().found().contains("uva"));
}

#[test]
fn test_pointer_down_on_background_is_ignored() {
    let (mut state, _, _) = game();
    // (0,3) belongs to no word
    assert!(!state.pointer_down(p(0, 3)));
    assert_eq!(state.pointer_up().outcome, "ignored");
}

#[test]
fn test_pointer_cancel_drops_path() {
    let (mut state, _, _) = game();
    state.pointer_down(p(0, 0));
    state.pointer_enter(p(0, 1));
    state.pointer_enter(p(0, 2));
    state.pointer_cancel();
    assert_eq!(state.session().found_count(), 0);
    assert_eq!(state.view().selection, "");
}

#[test]
fn test_tap_and_verify() {
    let (mut state, _, _) = game();
    assert_eq!(state.tap(p(1, 0)).outcome, "no_match");
    assert_eq!(state.view().selection, "K");
    assert_eq!(state.verify().outcome, "no_match");
    assert_eq!(state.message(), Some("Not a word"));
    assert_eq!(state.view().selection, "");
}

#[test]
fn test_keyboard_flow() {
    let (mut state, _, _) = game();
    assert!(state.handle_key("ArrowDown"));
    for _ in 0..3 {
        state.handle_key("Enter");
        state.handle_key("l");
    }
    state.handle_key("Enter");
    assert!(state.session().found().contains("kiwi"));
    assert!(!state.handle_key("F5"));
}

#[test]
fn test_completion_and_share() {
    let (mut state, clock, store) = game();
    clock.advance(42);
    for row in 0..4 {
        let len = if row == 0 { 3 } else { 4 };
        let path: Vec<Position> = (0..len).map(|col| p(row, col)).collect();
        drag(&mut state, &path);
    }

    let view = state.view();
    assert!(view.complete);
    assert_eq!(view.elapsed, "0:42");
    assert_eq!(view.best, "0:42");
    assert_eq!(state.message(), Some("Solved in 0:42! New best"));
    assert_eq!(store.peek("newsalad-frutas-001").as_deref(), Some("42"));
    assert!(state.session().share_text().ends_with("Time: 0:42"));
}

#[test]
fn test_hint_message() {
    let (mut state, _, _) = game();
    assert_eq!(state.hint(), Some('U'));
    assert_eq!(state.message(), Some("Hint: a word starts with U"));
    assert_eq!(state.view().hints_used, 1);
}

#[test]
fn test_state_serializes() {
    let (state, _, _) = game();
    let json = serde_json::to_value(state.view()).unwrap();
    assert_eq!(json["title"], "Frutas #1");
    assert_eq!(json["cells"][0]["letter"], "U");
    assert_eq!(json["words"][0]["shown"], "____");
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use crate::{LocalStorageStore, WordSaladGame};
    use salad_core::BestTimeStore;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_roundtrip() {
        let mut store = LocalStorageStore::from_window().unwrap();
        store.set("newsalad-wasm-test", "17").unwrap();
        assert_eq!(store.get("newsalad-wasm-test"), Ok(Some("17".to_string())));
    }

    #[wasm_bindgen_test]
    fn test_game_from_json() {
        let game = WordSaladGame::new(super::FRUTAS).unwrap();
        assert_eq!(game.size(), 4);
        assert_eq!(game.total_words(), 4);
        assert!(WordSaladGame::new("{}").is_err());
    }
}
