//! Key-value persistence for evaluation history.
//!
//! The engine does not talk to storage directly; it goes through the
//! [`HistoryStore`] trait so tests can inject [`MemoryStore`] and real
//! deployments can use [`FileStore`] (or their own backend). Values are
//! opaque strings; the engine stores JSON-encoded history under
//! [`HISTORY_KEY`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub mod error;

pub use error::StoreError;

/// The fixed key the engine persists its history under.
pub const HISTORY_KEY: &str = "calculatorHistory";

/// A string key-value store the engine can persist history into.
///
/// `load` distinguishes "no record" (`Ok(None)`) from "could not read"
/// (`Err`); the engine recovers from both by starting with an empty
/// history. Writes are synchronous and fire-and-forget: the engine
/// logs a failed write and keeps going.
pub trait HistoryStore {
    /// Read the record for `key`, if one exists.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the record for `key`, replacing any previous value.
    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the record for `key`. Deleting an absent record succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and demos. Never fails.
///
/// # Example
///
/// ```rust
/// use tallypad::store::{HistoryStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.store("k", "v").unwrap();
/// assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
/// store.remove("k").unwrap();
/// assert_eq!(store.load("k").unwrap(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

/// File-backed store: one file per key under a base directory.
///
/// Records live at `<dir>/<key>.json`. Keys are restricted to plain
/// names (no path separators, no dots) so a key can never escape the
/// base directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl HistoryStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io {
                key: key.to_string(),
                source: err,
            }),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io)?;
        fs::write(path, value).map_err(io)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io {
                key: key.to_string(),
                source: err,
            }),
        }
    }
}
