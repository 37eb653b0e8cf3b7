//! Key/value persistence
//!
//! The controller only needs "read a string under a key" and "write a
//! string under a key". [`MemoryStore`] keeps values in process for tests
//! and embedding; [`FileStore`] writes one file per key in the user's data
//! directory.
//!
//! # File Location
//!
//! `FileStore::in_user_data_dir()` resolves to e.g.
//! `~/.local/share/chess-controller/<key>.json` on Linux and falls back to
//! the working directory when no data directory can be determined.

use crate::core::error::{CoreError, CoreResult};
use directories::ProjectDirs;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Minimal persistence capability used by the stats store
pub trait KeyValueStore: Send + Sync {
    /// Stored value, `Ok(None)` when the key was never written
    fn read(&self, key: &str) -> CoreResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> CoreResult<()>;
}

/// In-process store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.lock().insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> CoreResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the platform data directory
    pub fn in_user_data_dir() -> Self {
        match ProjectDirs::from("org", "chess-controller", "chess-controller") {
            Some(dirs) => Self::new(dirs.data_dir()),
            None => Self::new("."),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(path, value)?;
        Ok(())
    }
}
