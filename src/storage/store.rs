use lazy_static::lazy_static;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::config;

lazy_static! {
    // Keys whose malformed value has already been reported, so a corrupt
    // entry warns once instead of on every read.
    static ref PARSE_WARNED: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
}

/// Async key-value store over one JSON file per key.
///
/// Single-device, single-process. A missing key reads as a default, a
/// malformed value reads as a default and warns once, and a failed write is
/// logged and reported as `false` so a lost write never crashes the
/// diagnosis flow. No lock is held across await points: concurrent writers
/// to the same key are last-write-wins.
#[derive(Debug, Clone)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        KvStore { root: root.into() }
    }

    /// Store rooted at the configured data dir, falling back to the platform
    /// app data directory.
    pub fn open_default() -> Self {
        let root = match &config::get_config().data_dir {
            Some(dir) => PathBuf::from(dir),
            None => {
                let mut dir = config::app_data_dir();
                dir.push("store");
                dir
            }
        };
        KvStore::new(root)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    pub async fn exists(&self, key: &str) -> bool {
        tokio::fs::try_exists(self.path_for(key)).await.unwrap_or(false)
    }

    /// Raw stored text for a key. Missing key resolves to None; other read
    /// errors are logged and also resolve to None.
    pub async fn read_raw(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key = key, path = ?path, error = %e, "Storage read failed");
                None
            }
        }
    }

    /// Write raw text under a key. Failures are logged, never returned.
    pub async fn write_raw(&self, key: &str, value: &str) -> bool {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(key = key, path = ?parent, error = %e, "Failed to create store directory");
                return false;
            }
        }
        match tokio::fs::write(&path, value).await {
            Ok(()) => {
                PARSE_WARNED.lock().remove(key);
                true
            }
            Err(e) => {
                tracing::warn!(key = key, path = ?path, error = %e, "Storage write failed");
                false
            }
        }
    }

    /// Typed read. Missing key resolves to None; a malformed value resolves
    /// to None and warns once per key.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = self.read_raw(key).await?;
        match serde_json::from_str::<T>(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                if PARSE_WARNED.lock().insert(key.to_string()) {
                    tracing::warn!(key = key, error = %e, "Malformed stored value, treating as empty");
                }
                None
            }
        }
    }

    /// Typed read resolving both a missing key and a malformed value to the
    /// type's default.
    pub async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read(key).await.unwrap_or_default()
    }

    /// Typed write. Returns false (and logs) on serialization or I/O failure.
    pub async fn write<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Failed to serialize value for storage");
                return false;
            }
        };
        self.write_raw(key, &json).await
    }

    /// Remove a key. A key that was already absent counts as success.
    pub async fn remove(&self, key: &str) -> bool {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                tracing::warn!(key = key, path = ?path, error = %e, "Storage remove failed");
                false
            }
        }
    }
}
