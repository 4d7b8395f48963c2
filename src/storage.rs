//! Key-value storage used for persisted table and tab session state.
//!
//! Storage is a flat namespace of string keys holding JSON strings. Every
//! backend is synchronous and may fail (quota, disk, permissions); callers in
//! this crate catch those failures at the boundary and log them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Synchronous string key-value store.
pub trait KeyValueStorage {
    /// Returns the stored value for `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Lists all stored keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Loads and deserializes a JSON value, falling back to `default` on any failure.
///
/// # Examples
/// ```
/// use rconsole::storage::{load_json_or, MemoryStorage};
///
/// let storage = MemoryStorage::new();
/// let rows: u32 = load_json_or(&storage, "rows", 10);
/// assert_eq!(rows, 10);
/// ```
pub fn load_json_or<T>(storage: &dyn KeyValueStorage, key: &str, default: T) -> T
where
    T: for<'de> Deserialize<'de>,
{
    try_load_json(storage, key).unwrap_or(default)
}

/// Attempts to load a JSON value, returning `None` if missing, unreadable or invalid.
pub fn try_load_json<T>(storage: &dyn KeyValueStorage, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("failed to read '{}' from storage: {:#}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring corrupt value stored under '{}': {}", key, e);
            None
        }
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn save_json<T>(storage: &mut dyn KeyValueStorage, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string(value).with_context(|| format!("failed to serialize '{}'", key))?;
    storage.set(key, json)
}

/// In-memory storage, used by tests and as a scratch store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.keys().cloned().collect())
    }
}

/// File-backed storage: one JSON object mapping keys to string values.
///
/// Every mutation rewrites the file through a temporary file followed by a
/// rename, so a crash never leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store {}", path.display()))?;
            if json.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&json)
                    .with_context(|| format!("store {} is not a JSON object of strings", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, data })
    }

    /// Opens the store at the platform default location.
    pub fn open_default() -> Result<Self> {
        Self::open(default_store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    // The in-memory map only changes once the file has been replaced.
    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut next = self.data.clone();
        next.insert(key.to_string(), value);
        self.flush(&next)?;
        self.data = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.remove(key);
        self.flush(&next)?;
        self.data = next;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.keys().cloned().collect())
    }
}

/// Storage that holds existing values but rejects every write, the way a
/// store with an exhausted quota does.
#[derive(Debug, Clone, Default)]
pub struct QuotaExceededStorage {
    data: BTreeMap<String, String>,
}

impl QuotaExceededStorage {
    /// Wraps a snapshot of `values` that stays readable.
    pub fn with_values(values: BTreeMap<String, String>) -> Self {
        Self { data: values }
    }
}

impl KeyValueStorage for QuotaExceededStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, _value: String) -> Result<()> {
        anyhow::bail!("quota exceeded while writing '{}'", key)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        anyhow::bail!("storage is read-only, cannot remove '{}'", key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.keys().cloned().collect())
    }
}

/// `<data dir>/rconsole/state.json`
pub fn default_store_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("no platform data directory available")?;
    Ok(base.join("rconsole").join("state.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_get_remove() {
        let mut storage = MemoryStorage::new();
        storage.set("a", "1".to_string()).unwrap();
        assert_eq!(storage.get("a").unwrap(), Some("1".to_string()));

        storage.remove("a").unwrap();
        assert_eq!(storage.get("a").unwrap(), None);
        // Removing twice is fine
        storage.remove("a").unwrap();
    }

    #[test]
    fn test_save_and_load_json() {
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, "widths", &[250.0f32, 120.0]).unwrap();

        let loaded: Vec<f32> = load_json_or(&storage, "widths", Vec::new());
        assert_eq!(loaded, vec![250.0, 120.0]);
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set("rows", "{not json".to_string()).unwrap();

        let rows: u32 = load_json_or(&storage, "rows", 25);
        assert_eq!(rows, 25);
        assert_eq!(try_load_json::<u32>(&storage, "rows"), None);
    }

    #[test]
    fn test_file_storage_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        {
            let mut storage = JsonFileStorage::open(&path).unwrap();
            storage.set("k1", "v1".to_string()).unwrap();
            storage.set("k2", "v2".to_string()).unwrap();
            storage.remove("k1").unwrap();
        }

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["k2".to_string()]);
        assert_eq!(storage.get("k2").unwrap(), Some("v2".to_string()));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_quota_exceeded_rejects_writes() {
        let mut values = BTreeMap::new();
        values.insert("k".to_string(), "1".to_string());
        let mut storage = QuotaExceededStorage::with_values(values);
        assert_eq!(storage.get("k").unwrap(), Some("1".to_string()));
        assert!(storage.set("k", "2".to_string()).is_err());
        assert!(save_json(&mut storage, "other", &3).is_err());
        assert_eq!(storage.get("k").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_failed_file_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut storage = JsonFileStorage::open(blocker.join("state.json")).unwrap();
        assert!(storage.set("k", "v".to_string()).is_err());
        assert_eq!(storage.get("k").unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());

        let mut data = BTreeMap::new();
        data.insert("kept".to_string(), "1".to_string());
        let mut storage = JsonFileStorage {
            path: blocker.join("state.json"),
            data,
        };
        assert!(storage.remove("kept").is_err());
        assert_eq!(storage.get("kept").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(JsonFileStorage::open(&path).is_err());
    }
}
