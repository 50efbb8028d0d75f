//! Best-time persistence
//!
//! The session only needs a string key-value store. Values are whole seconds
//! written as decimal text, keys are `<namespace>-<puzzle id>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "newsalad";

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a backing store can report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Backend(String),
}

/// Key-value storage for best times
pub trait BestTimeStore {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Build the storage key for a puzzle
pub fn best_time_key(namespace: &str, puzzle_id: &str) -> String {
    format!("{}-{}", namespace, puzzle_id)
}

/// Read and decode a stored best time. Failures and unreadable values count
/// as "no best yet".
pub fn load_best_time(store: &dyn BestTimeStore, key: &str) -> Option<u64> {
    match store.get(key) {
        Ok(Some(text)) => match text.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                tracing::warn!(%key, value = %text, "ignoring unreadable best time");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(%key, %err, "could not read best time");
            None
        }
    }
}

/// Encode and write a best time. A failed write is logged and dropped.
pub fn save_best_time(store: &mut dyn BestTimeStore, key: &str, secs: u64) -> bool {
    match store.set(key, &secs.to_string()) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%key, %err, "could not save best time");
            false
        }
    }
}

/// In-memory store. Clones share the same map, so a test can inspect what a
/// session wrote after handing it a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestTimeStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    unavailable: Arc<Mutex<bool>>,
}

impl MemoryBestTimeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail (or succeed again)
    pub fn set_available(&self, available: bool) {
        if let Ok(mut flag) = self.unavailable.lock() {
            *flag = !available;
        }
    }

    /// Stored value for a key, bypassing the availability switch
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> StoreResult<()> {
        match self.unavailable.lock() {
            Ok(flag) if *flag => Err(StoreError::Unavailable("memory store disabled".into())),
            Ok(_) => Ok(()),
            Err(_) => Err(StoreError::Backend("lock poisoned".into())),
        }
    }
}

impl BestTimeStore for MemoryBestTimeStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_available()?;
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(best_time_key(DEFAULT_NAMESPACE, "terras-001"), "newsalad-terras-001");
        assert_eq!(best_time_key("dev", "x"), "dev-x");
    }

    #[test]
    fn test_memory_store_roundtrip_and_shared_clones() {
        let store = MemoryBestTimeStore::new();
        let mut writer = store.clone();
        assert_eq!(writer.get("k"), Ok(None));
        writer.set("k", "45").unwrap();
        assert_eq!(store.peek("k").as_deref(), Some("45"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unavailable_store_fails() {
        let mut store = MemoryBestTimeStore::new();
        store.set_available(false);
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(store.set("k", "1").is_err());
        assert!(store.is_empty());
        store.set_available(true);
        assert!(store.set("k", "1").is_ok());
    }

    #[test]
    fn test_load_best_time_tolerates_failures() {
        let mut store = MemoryBestTimeStore::new();
        assert_eq!(load_best_time(&store, "k"), None);

        store.set("k", " 30 ").unwrap();
        assert_eq!(load_best_time(&store, "k"), Some(30));

        store.set("k", "soon").unwrap();
        assert_eq!(load_best_time(&store, "k"), None);

        store.set("k", "30").unwrap();
        store.set_available(false);
        assert_eq!(load_best_time(&store, "k"), None);
    }

    #[test]
    fn test_save_best_time_reports_failure() {
        let mut store = MemoryBestTimeStore::new();
        assert!(save_best_time(&mut store, "k", 12));
        assert_eq!(store.peek("k").as_deref(), Some("12"));

        store.set_available(false);
        assert!(!save_best_time(&mut store, "k", 5));
        assert_eq!(store.peek("k").as_deref(), Some("12"));
    }
}
