use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StoreBackend, StoreConfig};

/// Durable key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";
/// Durable key under which the light/dark theme preference is persisted.
pub const THEME_KEY: &str = "theme";

/// The PrefStore trait abstracts the durable key/value preference storage
/// (the localStorage analogue). Values are plain strings, no structured
/// encoding. Writers own their keys by convention (the session manager for
/// the token, the theme module for the theme); readers re-read per request.
#[async_trait]
pub trait PrefStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    async fn put(&self, key: &str, value: &str) -> Result<(), String>;
    async fn delete(&self, key: &str) -> Result<(), String>;
    fn is_persistent(&self) -> bool {
        // Default implementation should return always True for durable stores.
        // MemoryStore returns false so we can write better debug messages.
        true
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
/// If `store.enabled = false`, returns a MemoryStore (nothing survives the
/// process). Otherwise, picks the specified backend.
pub async fn create_store(config: &StoreConfig) -> Arc<dyn PrefStore> {
    if !config.enabled {
        info!("Preference store is disabled. Using in-memory store.");
        return Arc::new(MemoryStore::new());
    }

    match &config.backend {
        Some(StoreBackend::File(file_config)) => match FileStore::open(file_config).await {
            Ok(store) => {
                info!("Successfully opened file store at '{}'.", file_config.path);
                Arc::new(store)
            }
            Err(e) => {
                error!("Failed to open file store: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            error!("Store is enabled, but no backend config is provided!");
            std::process::exit(1);
        }
    }
}
