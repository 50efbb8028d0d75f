//! In-progress selection built from pointer gestures
//!
//! Two gesture families feed the same path:
//! - drag (press, move, release) only ever appends the hovered cell
//! - tap (discrete clicks) can also backtrack, truncate or restart

use crate::Position;

/// Whether a selection is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Empty path
    Idle,
    /// Non-empty path
    Selecting,
}

/// What a tap did to the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEffect {
    /// Path was empty and now holds the tapped cell
    Began,
    /// Tapped cell was appended
    Extended,
    /// Tapped the last cell again: it was removed
    Backtracked,
    /// Tapped an earlier cell: everything after it was dropped
    Truncated,
    /// Tapped a cell that cannot extend the path: it starts a new one
    Restarted,
}

/// The single mutable selection path of a session
#[derive(Debug, Clone, Default)]
pub struct PathTracker {
    path: Vec<Position>,
    dragging: bool,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn state(&self) -> TrackerState {
        if self.path.is_empty() {
            TrackerState::Idle
        } else {
            TrackerState::Selecting
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn last(&self) -> Option<Position> {
        self.path.last().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.path.contains(&pos)
    }

    /// Start a drag: the path becomes the pressed cell
    pub fn press(&mut self, pos: Position) {
        self.path.clear();
        self.path.push(pos);
        self.dragging = true;
        tracing::debug!(%pos, "drag started");
    }

    /// The pointer entered a cell during a drag. Returns whether the path
    /// changed.
    ///
    /// Repeats of the last cell, cells already on the path and cells that
    /// are not adjacent to the last one are ignored.
    pub fn drag_over(&mut self, pos: Position) -> bool {
        if !self.dragging {
            return false;
        }
        let Some(last) = self.last() else {
            return false;
        };
        if last == pos || !last.is_adjacent(pos) || self.contains(pos) {
            return false;
        }
        self.path.push(pos);
        tracing::debug!(%pos, len = self.path.len(), "drag extended");
        true
    }

    /// End a drag, handing back the finished path and leaving the tracker
    /// idle. Returns `None` if no drag was active.
    pub fn release(&mut self) -> Option<Vec<Position>> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(std::mem::take(&mut self.path))
    }

    /// Apply a tap to the path
    pub fn tap(&mut self, pos: Position) -> TapEffect {
        self.dragging = false;

        let index = self.path.iter().position(|&p| p == pos);
        let effect = match index {
            None if self.path.is_empty() => {
                self.path.push(pos);
                TapEffect::Began
            }
            Some(i) if i + 1 == self.path.len() => {
                self.path.pop();
                TapEffect::Backtracked
            }
            Some(i) => {
                self.path.truncate(i + 1);
                TapEffect::Truncated
            }
            None => match self.last() {
                Some(last) if last.is_adjacent(pos) => {
                    self.path.push(pos);
                    TapEffect::Extended
                }
                _ => {
                    self.path.clear();
                    self.path.push(pos);
                    TapEffect::Restarted
                }
            },
        };

        tracing::debug!(%pos, ?effect, len = self.path.len(), "tap");
        effect
    }

    /// Remove the last cell, if any
    pub fn backtrack(&mut self) -> Option<Position> {
        self.path.pop()
    }

    /// Empty the path and end any drag
    pub fn clear(&mut self) {
        self.path.clear();
        self.dragging = false;
    }
}
