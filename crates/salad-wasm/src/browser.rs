//! Browser-backed clock and storage

use salad_core::{BestTimeStore, StoreError, StoreResult, TickSource};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Get current timestamp in milliseconds
fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Tick source reading `performance.now()`. Partial seconds carry over.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    anchor_ms: f64,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self { anchor_ms: now() }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for PerformanceClock {
    fn reset(&mut self) {
        self.anchor_ms = now();
    }

    fn take_ticks(&mut self) -> u64 {
        let secs = whole_seconds(now() - self.anchor_ms);
        self.anchor_ms += secs as f64 * 1000.0;
        secs
    }
}

/// Whole seconds in a millisecond span; negative spans count as zero
pub fn whole_seconds(elapsed_ms: f64) -> u64 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        (elapsed_ms / 1000.0).floor() as u64
    } else {
        0
    }
}

/// Best times in `window.localStorage`
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn from_window() -> StoreResult<Self> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl BestTimeStore for LocalStorageStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Backend(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(0.0), 0);
        assert_eq!(whole_seconds(999.9), 0);
        assert_eq!(whole_seconds(1000.0), 1);
        assert_eq!(whole_seconds(61_500.0), 61);
        assert_eq!(whole_seconds(-5.0), 0);
        assert_eq!(whole_seconds(f64::NAN), 0);
    }
}
