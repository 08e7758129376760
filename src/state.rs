//! Shared application context.
//!
//! Everything stateful the client owns, constructed once at process start by
//! `startup::build_context` and passed by reference to whoever needs it.
//! There are no module-level singletons.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::http::ApiClient;
use crate::push::PushManager;
use crate::session::SessionManager;
use crate::store::PrefStore;
use crate::theme::ThemeManager;

/// Application context shared across the client.
///
/// Cloning is cheap; every field is (or wraps) an `Arc`.
#[derive(Clone)]
pub struct AppContext {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Durable preference storage (token, theme).
    pub store: Arc<dyn PrefStore>,
    /// HTTP client for the backend API.
    pub api: ApiClient,
    /// Session manager: authentication state and its persistence.
    pub session: Arc<SessionManager>,
    /// Push subscription manager.
    pub push: Arc<PushManager>,
    /// Theme preference access.
    pub theme: ThemeManager,
}
