//! Key-value persistence
//!
//! Features:
//! - `KeyValueStore` abstraction over string storage
//! - In-memory backend (native, tests) and LocalStorage backend (web)
//! - Best-effort best-score store that never fails the caller

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::consts::BEST_SCORE_KEY;

/// Storage backend failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// Simple string key-value capability
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best score persisted as a decimal integer under `BEST_SCORE_KEY`.
///
/// Usually wraps a `&mut` borrow of a store that also holds other keys.
/// Failures are logged and swallowed: a failed read is "no stored best", a
/// failed write simply has no durable effect.
#[derive(Debug)]
pub struct BestScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> BestScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored best score, if any
    pub fn get(&self) -> Option<u32> {
        match self.store.read(BEST_SCORE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(best) => Some(best),
                Err(_) => {
                    log::warn!("Ignoring unreadable best score {:?}", raw);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Best score unavailable: {}", e);
                None
            }
        }
    }

    /// Persist a new best score (fire-and-forget)
    pub fn set(&mut self, best: u32) {
        match self.store.write(BEST_SCORE_KEY, &best.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", best),
            Err(e) => log::warn!("Best score not saved: {}", e),
        }
    }
}
