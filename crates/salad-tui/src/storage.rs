//! Best-time storage backends for the terminal front-end
//!
//! - Local: JSON file in the data directory
//! - Test: in-memory map shared by every session of the process

use crate::config::Environment;
use salad_core::{BestTimeStore, MemoryBestTimeStore, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name of the best-time store inside the data directory
pub const BEST_TIMES_FILE: &str = "newsalad_best_times.json";

// ==================== Local File Backend ====================

/// File-backed key-value store: one JSON object of key to seconds-as-text
pub struct FileBestTimeStore {
    path: PathBuf,
    cache: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileBestTimeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| StoreError::Backend("cache lock poisoned".into()))?;
        if let Some(ref data) = *cache {
            return Ok(data.clone());
        }

        let data = match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                tracing::warn!(path = %self.path.display(), %err, "best time file is corrupt, starting fresh");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StoreError::Unavailable(err.to_string())),
        };

        *cache = Some(data.clone());
        Ok(data)
    }

    fn save(&self, data: &BTreeMap<String, String>) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| StoreError::Backend(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| StoreError::Backend("cache lock poisoned".into()))?;
        *cache = Some(data.clone());
        Ok(())
    }
}

impl BestTimeStore for FileBestTimeStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut data = self.load()?;
        data.insert(key.to_string(), value.to_string());
        self.save(&data)?;
        tracing::debug!(path = %self.path.display(), %key, %value, "best time written");
        Ok(())
    }
}

// ==================== Backend selection ====================

/// Hands out a store for each new session
#[derive(Debug, Clone)]
pub enum StoreBackend {
    File(PathBuf),
    Memory(MemoryBestTimeStore),
}

impl StoreBackend {
    pub fn for_environment(env: Environment, data_dir: &Path) -> Self {
        match env {
            Environment::Local => StoreBackend::File(data_dir.join(BEST_TIMES_FILE)),
            Environment::Test => StoreBackend::Memory(MemoryBestTimeStore::new()),
        }
    }

    pub fn open(&self) -> Box<dyn BestTimeStore> {
        match self {
            StoreBackend::File(path) => Box::new(FileBestTimeStore::new(path.clone())),
            StoreBackend::Memory(store) => Box::new(store.clone()),
        }
    }

    /// Backend name for display
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::File(_) => "Local",
            StoreBackend::Memory(_) => "Memory",
        }
    }
}
