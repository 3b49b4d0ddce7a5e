// src/store.rs
//
// String key/value backends. Values are opaque strings here; `storage.rs`
// layers JSON encoding and the application keys on top.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

use crate::errors::AppError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError>;

    async fn remove_item(&self, key: &str) -> Result<(), AppError>;

    /// Picks up changes made by someone else (another process editing the
    /// backing file). Returns `true` when the visible contents changed.
    async fn reload_external(&self) -> Result<bool, AppError> {
        Ok(false)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One JSON object on disk, `{ "<key>": "<json string>" }`, rewritten after
/// every mutation. Reads are served from memory.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
    // Modification time of the file as we last wrote or read it.
    synced_at: Mutex<Option<SystemTime>>,
}

impl JsonFileStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let entries = if fs::try_exists(&path).await? {
            read_entries(&path).await?
        } else {
            tracing::info!("Data file {} does not exist yet, starting empty", path.display());
            BTreeMap::new()
        };
        let synced_at = modified_at(&path).await;

        Ok(Self {
            path,
            entries: RwLock::new(entries),
            synced_at: Mutex::new(synced_at),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        let body = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, body).await?;
        fs::rename(&tmp_path, &self.path).await?;

        *self.synced_at.lock().await = modified_at(&self.path).await;
        Ok(())
    }
}

async fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, AppError> {
    let raw = fs::read(path).await?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(BTreeMap::new());
    }
    serde_json::from_slice(&raw).map_err(|e| {
        tracing::error!("Data file {} is not a JSON object of strings: {}", path.display(), e);
        AppError::Storage(format!("Corrupted data file {}: {}", path.display(), e))
    })
}

async fn modified_at(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).await.ok().and_then(|m| m.modified().ok())
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        self.flush(&entries).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            self.flush(&entries).await?;
        }
        Ok(())
    }

    async fn reload_external(&self) -> Result<bool, AppError> {
        // Same lock order as `set_item` -> `flush`: entries, then synced_at.
        // Holding `entries` across the read keeps a local write from landing
        // between reading the snapshot and installing it.
        let mut entries = self.entries.write().await;
        let mut synced_at = self.synced_at.lock().await;

        let current = modified_at(&self.path).await;
        if current.is_none() || current == *synced_at {
            return Ok(false);
        }

        let fresh = read_entries(&self.path).await?;
        *synced_at = current;
        if *entries == fresh {
            return Ok(false);
        }
        *entries = fresh;
        tracing::info!("Reloaded data file {} after an external change", self.path.display());
        Ok(true)
    }
}
