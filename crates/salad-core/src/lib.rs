//! Word salad puzzle engine
//!
//! A puzzle is a square letter grid plus a registry of hidden words, each with
//! an exact cell path. Players trace paths by dragging or tapping; a path that
//! matches an unfound word exactly commits it. Letters disappear once every
//! word that uses them has been found.
//!
//! The crate has no UI. Front-ends drive a [`Session`] and redraw from its
//! [`BoardView`].

pub mod grid;
pub mod matcher;
pub mod path;
pub mod position;
pub mod puzzle;
pub mod session;
pub mod share;
pub mod store;
pub mod timer;
pub mod visibility;

pub use grid::{Grid, GridError};
pub use matcher::{find_match, FoundSet};
pub use path::{PathTracker, TapEffect, TrackerState};
pub use position::Position;
pub use puzzle::{Puzzle, PuzzleError, PuzzleRecord, Word, WordRecord};
pub use session::{Completion, Evaluation, Session, SessionConfig, WordEntry};
pub use share::share_text;
pub use store::{
    best_time_key, load_best_time, save_best_time, BestTimeStore, MemoryBestTimeStore,
    StoreError, StoreResult, DEFAULT_NAMESPACE,
};
#[cfg(not(target_arch = "wasm32"))]
pub use timer::WallClock;
pub use timer::{format_clock, ManualClock, SessionTimer, TickSource, TimerState};
pub use visibility::{BoardView, CellStyle, CellView};
