//! Key-value persistence for values shared with other pages
//!
//! The game only ever writes small strings: the final score under
//! [`LAST_SCORE_KEY`] and the optional tuning override. Writes are
//! best-effort; a session never fails because storage did.

use std::collections::HashMap;

/// Key the results page reads the final score from
pub const LAST_SCORE_KEY: &str = "lastScore";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available in this context")]
    Unavailable,

    #[error("Failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the window's LocalStorage
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// Write the final score for the results page.
///
/// Best-effort: a failed write is logged and otherwise ignored.
pub fn save_last_score(store: &mut impl KeyValueStore, score: u32) {
    match store.set(LAST_SCORE_KEY, &score.to_string()) {
        Ok(()) => log::info!("Saved last score {}", score),
        Err(e) => log::warn!("Could not save last score: {}", e),
    }
}

/// Read back the last saved score, if any
pub fn load_last_score(store: &impl KeyValueStore) -> Option<u32> {
    store.get(LAST_SCORE_KEY)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store that rejects every write
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_last_score_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_last_score(&store), None);

        save_last_score(&mut store, 42);
        assert_eq!(store.get(LAST_SCORE_KEY).as_deref(), Some("42"));
        assert_eq!(load_last_score(&store), Some(42));
    }

    #[test]
    fn test_last_score_overwrites() {
        let mut store = MemoryStore::new();
        save_last_score(&mut store, 7);
        save_last_score(&mut store, 3);
        assert_eq!(load_last_score(&store), Some(3));
    }

    #[test]
    fn test_garbage_score_reads_as_none() {
        let mut store = MemoryStore::new();
        store.set(LAST_SCORE_KEY, "not a number").unwrap();
        assert_eq!(load_last_score(&store), None);
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let mut store = FullStore;
        // Must not panic
        save_last_score(&mut store, 10);
        assert_eq!(load_last_score(&store), None);
    }
}
