//! Whole-second session timer driven by an injected tick source

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Supplies elapsed whole seconds to a [`SessionTimer`]
pub trait TickSource {
    /// Forget any time accumulated so far
    fn reset(&mut self);

    /// Number of whole seconds that passed since the last call (or reset).
    /// Partial seconds carry over to the next call.
    fn take_ticks(&mut self) -> u64;
}

/// Real-time tick source backed by [`std::time::Instant`]
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct WallClock {
    anchor: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl WallClock {
    pub fn new() -> Self {
        Self {
            anchor: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TickSource for WallClock {
    fn reset(&mut self) {
        self.anchor = std::time::Instant::now();
    }

    fn take_ticks(&mut self) -> u64 {
        let secs = self.anchor.elapsed().as_secs();
        self.anchor += std::time::Duration::from_secs(secs);
        secs
    }
}

/// Tick source advanced by hand. Clones share the same pending count, so a
/// test (or an external timer callback) can keep a handle after giving the
/// clock to a session.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `secs` seconds for the next poll
    pub fn advance(&self, secs: u64) {
        self.pending.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TickSource for ManualClock {
    fn reset(&mut self) {
        self.pending.store(0, Ordering::SeqCst);
    }

    fn take_ticks(&mut self) -> u64 {
        self.pending.swap(0, Ordering::SeqCst)
    }
}

/// Timer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not started yet
    Idle,
    /// Counting seconds
    Running,
    /// Puzzle completed; the count no longer changes
    Frozen,
    /// Session ended before completion
    Stopped,
}

/// Counts elapsed whole seconds while running
pub struct SessionTimer {
    source: Box<dyn TickSource>,
    elapsed: u64,
    state: TimerState,
}

impl SessionTimer {
    pub fn new(source: Box<dyn TickSource>) -> Self {
        Self {
            source,
            elapsed: 0,
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed
    }

    /// Begin counting from the current moment. Has no effect once running
    /// or finished.
    pub fn start(&mut self) {
        if self.state == TimerState::Idle {
            self.source.reset();
            self.state = TimerState::Running;
        }
    }

    /// Advance by exactly one second
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed += 1;
        }
    }

    /// Pull pending seconds from the tick source. Returns how many were added.
    pub fn poll(&mut self) -> u64 {
        if !self.is_running() {
            return 0;
        }
        let ticks = self.source.take_ticks();
        self.elapsed += ticks;
        ticks
    }

    /// Stop counting for good, keeping the final value
    pub fn freeze(&mut self) {
        if self.is_running() {
            self.poll();
        }
        self.state = TimerState::Frozen;
    }

    /// Stop counting because the session is over. A frozen timer stays frozen.
    pub fn stop(&mut self) {
        if self.state != TimerState::Frozen {
            self.state = TimerState::Stopped;
        }
    }
}

impl std::fmt::Debug for SessionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTimer")
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .finish()
    }
}

/// Format seconds as `M:SS`
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
