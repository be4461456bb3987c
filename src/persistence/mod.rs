//! Key-value persistence for the high score
//!
//! The simulation only ever needs one scalar, so the storage seam is a
//! plain string key-value store. Backends:
//! - [`MemoryStore`]: in-process map (tests, demos)
//! - [`JsonFileStore`]: JSON object on disk (native)
//! - `platform::web::LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

/// Storage key for the persisted high score
pub const HIGH_SCORE_KEY: &str = "endlessRunnerHighScore";

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Reads and writes the high score through a [`KeyValueStore`]
#[derive(Debug)]
pub struct HighScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> HighScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored high score, or 0 if missing or unreadable
    pub fn load(&self) -> u64 {
        match self.store.get(HIGH_SCORE_KEY) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(score) => score,
                Err(err) => {
                    log::warn!("Ignoring corrupt high score {:?}: {}", raw, err);
                    0
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    /// Persist a new record. Writing the same value twice is harmless.
    pub fn save(&mut self, score: u64) {
        self.store.set(HIGH_SCORE_KEY, &score.to_string());
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_zero() {
        let scores = HighScoreStore::new(MemoryStore::default());
        assert_eq!(scores.load(), 0);
    }

    #[test]
    fn test_round_trip() {
        let mut scores = HighScoreStore::new(MemoryStore::default());
        scores.save(230);
        assert_eq!(scores.load(), 230);
        assert_eq!(scores.store().get(HIGH_SCORE_KEY).as_deref(), Some("230"));
    }

    #[test]
    fn test_corrupt_values_are_zero() {
        for raw in ["", "abc", "-10", "12.5", "99999999999999999999999"] {
            let mut store = MemoryStore::default();
            store.set(HIGH_SCORE_KEY, raw);
            assert_eq!(HighScoreStore::new(store).load(), 0, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_whitespace_tolerated() {
        let mut store = MemoryStore::default();
        store.set(HIGH_SCORE_KEY, " 40\n");
        assert_eq!(HighScoreStore::new(store).load(), 40);
    }

    #[test]
    fn test_idempotent_save() {
        let mut scores = HighScoreStore::new(MemoryStore::default());
        scores.save(70);
        scores.save(70);
        assert_eq!(scores.load(), 70);
        assert_eq!(scores.store().writes(), 2);
    }
}
