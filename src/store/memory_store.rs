use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::PrefStore;

/// An in-memory preference store. Used when persistence is disabled and in
/// tests; nothing survives the process, so every start looks logged out.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrefStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock().expect("preference store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().expect("preference store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().expect("preference store mutex poisoned");
        entries.remove(key);
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
