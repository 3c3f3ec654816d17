//! # Key-Value Store
//!
//! Durable string storage for shopper state that outlives a session.
//! Today that is only the wishlist, under `santos_wishlist`.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStore                                      │
//! │                                                                         │
//! │   get(key) -> Option<String>    set(key, value)    remove(key)         │
//! │                                                                         │
//! │   ┌───────────────────────────┐     ┌───────────────────────────┐      │
//! │   │        FileStore          │     │       MemoryStore         │      │
//! │   │                           │     │                           │      │
//! │   │  <data dir>/              │     │  HashMap behind a Mutex   │      │
//! │   │    santos_wishlist.json   │     │  (tests, ephemeral runs)  │      │
//! │   │                           │     │                           │      │
//! │   │  write .tmp ──► rename    │     │                           │      │
//! │   └───────────────────────────┘     └───────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is synchronous. Values are small and writes happen on a
//! shopper's click, so the storefront persists inline instead of handing
//! writes to a background task.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{DbError, DbResult};

/// Durable string storage keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Deletes the key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> DbResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// File Store
// =============================================================================

/// One JSON file per key inside a data directory.
///
/// ## Example
/// ```rust,ignore
/// let store = FileStore::open(data_dir)?;
/// store.set("santos_wishlist", r#"["1","6"]"#)?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> DbResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> DbResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DbError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let path = self.path_for(key)?;
        // A crash mid-write leaves the old file intact.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
