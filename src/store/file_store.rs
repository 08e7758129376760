use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::PrefStore;

/// The config needed for the file-backed preference store.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct FileStoreConfig {
    /// Path of the JSON file holding the preference map.
    pub path: String,
}

/// A preference store persisted as a flat JSON object on disk. The whole map
/// is loaded at open and rewritten on every mutation; with two small string
/// keys that is cheaper than anything incremental.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store, loading any existing file. A missing file means an
    /// empty store; an unreadable or corrupt file is reported but the store
    /// starts empty rather than refusing to run.
    pub async fn open(config: &FileStoreConfig) -> Result<Self, String> {
        let path = PathBuf::from(&config.path);
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Preference file '{}' is corrupt ({}); starting empty",
                        config.path, e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(format!("Cannot read '{}': {}", config.path, e)),
        };

        Ok(FileStore {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), String> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Cannot serialize preferences: {}", e))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("Cannot create '{}': {}", parent.display(), e))?;
            }
        }
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| format!("Cannot write '{}': {}", self.path.display(), e))
    }
}

#[async_trait]
impl PrefStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_none() {
            debug!("Delete of absent preference key '{}'", key);
            return Ok(());
        }
        self.persist(&entries).await
    }
}
