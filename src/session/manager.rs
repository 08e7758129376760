use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::core::{SessionCore, SessionEvent, SessionSnapshot};
use crate::http::{ApiClient, ApiError};
use crate::models::{AuthResponse, RegisterProfile, User};

/// Single source of truth for "is the caller authenticated, and as whom".
///
/// Constructed once at process start and shared by reference; owns every
/// write to the session (the HTTP client's 401 hook goes through the same
/// [`SessionCore`]).
pub struct SessionManager {
    core: Arc<SessionCore>,
    api: ApiClient,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl SessionManager {
    pub fn new(core: Arc<SessionCore>, api: ApiClient) -> Self {
        SessionManager { core, api }
    }

    /// Attempts to restore a persisted session at process start.
    ///
    /// A stored token is validated against `GET /auth/me`; any failure wipes
    /// the session. Route-guard decisions stay deferred (`loading`) until
    /// this completes, so a slow backend never causes a flash-redirect.
    pub async fn restore(&self) {
        let Some(token) = self.core.persisted_token().await else {
            debug!("No persisted token; starting logged out");
            self.core.finish_restore();
            return;
        };

        self.core.adopt_token(token);
        match self.api.get_json::<User>("/auth/me").await {
            Ok(user) => {
                info!("Restored session for '{}'", user.email);
                self.core.set_user(user);
            }
            Err(e) => {
                warn!("Failed to restore session: {}", e);
                self.core.clear().await;
            }
        }
        self.core.finish_restore();
    }

    /// Exchanges credentials for a session. On success the token is
    /// persisted and token + user are installed together; on failure the
    /// session is left untouched and the error carries the backend's message
    /// (or a generic fallback) for the caller to display.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest { email, password };
        match self.api.post_json::<_, AuthResponse>("/auth/login", &request).await {
            Ok(response) => {
                self.core
                    .establish(response.access_token, response.user.clone())
                    .await;
                info!("Login successful for '{}'", response.user.email);
                Ok(response.user)
            }
            Err(e) => {
                warn!("Login failed: {}", e.surface_message("Login failed"));
                Err(e)
            }
        }
    }

    /// Same contract as [`login`](Self::login), creating the account first.
    /// The response carries a fresh token and the new user record.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<User, ApiError> {
        match self
            .api
            .post_json::<_, AuthResponse>("/auth/register", profile)
            .await
        {
            Ok(response) => {
                self.core
                    .establish(response.access_token, response.user.clone())
                    .await;
                info!("Registration successful for '{}'", response.user.email);
                Ok(response.user)
            }
            Err(e) => {
                warn!("Registration failed: {}", e.surface_message("Registration failed"));
                Err(e)
            }
        }
    }

    /// Clears durable storage and in-memory state. Idempotent, and never
    /// navigates; callers decide where to redirect.
    pub async fn logout(&self) {
        self.core.clear().await;
        info!("Logged out");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.core.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.core.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.core.is_admin()
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn current_user(&self) -> Option<User> {
        self.core.current_user()
    }

    /// Session transitions, for whoever owns navigation.
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.core.subscribe()
    }
}
