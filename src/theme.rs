//! Light/dark theme preference, persisted next to the session token but
//! otherwise unrelated to it.

use std::sync::Arc;

use tracing::warn;

use crate::store::{PrefStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reads and writes the theme preference on the shared store.
#[derive(Clone)]
pub struct ThemeManager {
    store: Arc<dyn PrefStore>,
}

impl ThemeManager {
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        ThemeManager { store }
    }

    /// The stored preference; absent or unrecognized values fall back to
    /// light.
    pub async fn load(&self) -> Theme {
        match self.store.get(THEME_KEY).await {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or(Theme::Light),
            Ok(None) => Theme::Light,
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                Theme::Light
            }
        }
    }

    pub async fn save(&self, theme: Theme) {
        if let Err(e) = self.store.put(THEME_KEY, theme.as_str()).await {
            warn!("Could not persist theme preference: {}", e);
        }
    }

    /// Flips the preference, persists it, and returns the new value.
    pub async fn toggle(&self) -> Theme {
        let next = self.load().await.toggled();
        self.save(next).await;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn manager() -> ThemeManager {
        ThemeManager::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_defaults_to_light() {
        assert_eq!(manager().load().await, Theme::Light);
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let themes = manager();

        assert_eq!(themes.toggle().await, Theme::Dark);
        assert_eq!(themes.load().await, Theme::Dark);

        assert_eq!(themes.toggle().await, Theme::Light);
        assert_eq!(themes.load().await, Theme::Light);
    }

    /// A garbled stored value falls back to light instead of erroring.
    #[tokio::test]
    async fn test_garbled_value_falls_back() {
        let store = Arc::new(MemoryStore::new());
        store.put(THEME_KEY, "solarized").await.expect("seed value");

        let themes = ThemeManager::new(store);
        assert_eq!(themes.load().await, Theme::Light);
    }
}
