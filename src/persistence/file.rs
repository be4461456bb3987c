//! JSON file backend for native builds

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::KeyValueStore;

/// A flat JSON object on disk, rewritten on every `set`
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// An unreadable or malformed file starts the store empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed store {}: {}", path.display(), err);
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!("Could not read store {}: {}", path.display(), err);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        match self.flush() {
            Ok(()) => log::debug!("Saved {} to {}", key, self.path.display()),
            Err(err) => log::warn!("Could not write store {}: {}", self.path.display(), err),
        }
    }
}
