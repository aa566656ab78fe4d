/// Browser local-storage equivalent: whole-blob JSON values keyed by logical
/// name, read and written as a unit on every access.
// region:    --- Imports
use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

// endregion: --- Imports

// region:    --- Keys

/// Serialized cart item list.
pub const KEY_CART: &str = "cart";

/// Bearer auth credential.
pub const KEY_TOKEN: &str = "token";

/// Current-session identity blob (id and role included).
pub const KEY_USER: &str = "user";

/// Legacy session hint: account type.
pub const KEY_USER_TYPE: &str = "userType";

/// Legacy session hint: account email.
pub const KEY_USER_EMAIL: &str = "userEmail";

// endregion: --- Keys

// region:    --- LocalStore Trait

/// Key/value blob store. Mutations are synchronous so callers observe a
/// consistent post-write state before returning.
pub trait LocalStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Value>>;
    fn write(&self, key: &str, value: &Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed read over the raw blob.
pub fn read_json<T: DeserializeOwned>(store: &dyn LocalStore, key: &str) -> Result<Option<T>> {
    match store.read(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Typed write of the whole blob.
pub fn write_json<T: Serialize>(store: &dyn LocalStore, key: &str, value: &T) -> Result<()> {
    store.write(key, &serde_json::to_value(value)?)
}

// endregion: --- LocalStore Trait

// region:    --- FileStore

/// File-backed store: one `<key>.json` file per logical key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create the store, making sure the backing directory exists.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LocalStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        std::fs::write(self.path_for(key), raw)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// endregion: --- FileStore

// region:    --- MemoryStore

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

// endregion: --- MemoryStore
