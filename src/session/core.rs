use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::User;
use crate::store::{PrefStore, TOKEN_KEY};

/// Session transitions observable from outside the managers. The router (or
/// the binary) watches for `Expired` to navigate to the login entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Idle,
    Expired,
}

/// Read-only view of the session for route-guard decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub authenticated: bool,
    pub is_admin: bool,
}

#[derive(Debug)]
struct SessionData {
    token: Option<String>,
    user: Option<User>,
    loading: bool,
}

/// Holds the authenticated-session state shared by the session manager and
/// the HTTP client: who is logged in, the in-memory token, the restore flag,
/// and the once-per-epoch expiry latch behind the global 401 policy.
///
/// Invariant: `user` is set only while `token` is set and was last validated
/// against the backend; the two are cleared together, and the durable copy of
/// the token is cleared in the same call.
pub struct SessionCore {
    state: Mutex<SessionData>,
    store: Arc<dyn PrefStore>,
    expiry_handled: AtomicBool,
    events: watch::Sender<SessionEvent>,
}

impl SessionCore {
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        let (events, _) = watch::channel(SessionEvent::Idle);
        SessionCore {
            state: Mutex::new(SessionData {
                token: None,
                user: None,
                loading: true,
            }),
            store,
            expiry_handled: AtomicBool::new(false),
            events,
        }
    }

    /// The preference store this session persists its token in. The theme
    /// module shares the same store under its own key.
    pub fn store(&self) -> &Arc<dyn PrefStore> {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Reads the token from durable storage. Used per-request by the HTTP
    /// client; never cached, so a logout takes effect on the next call.
    pub async fn persisted_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read token from preference store: {}", e);
                None
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().expect("session state mutex poisoned");
        SessionSnapshot {
            loading: state.loading,
            authenticated: state.token.is_some(),
            is_admin: state.user.as_ref().map(|u| u.is_admin).unwrap_or(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot().is_admin
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().loading
    }

    pub fn current_user(&self) -> Option<User> {
        let state = self.state.lock().expect("session state mutex poisoned");
        state.user.clone()
    }

    /// Persist a fresh token and install token + user together. Called on
    /// successful login/register; re-arms the expiry latch for the new epoch.
    pub async fn establish(&self, token: String, user: User) {
        if let Err(e) = self.store.put(TOKEN_KEY, &token).await {
            // The in-memory session is still valid for this process.
            warn!("Could not persist token: {}", e);
        }
        {
            let mut state = self.state.lock().expect("session state mutex poisoned");
            state.token = Some(token);
            state.user = Some(user);
        }
        self.expiry_handled.store(false, Ordering::SeqCst);
    }

    /// Install a persisted token ahead of validation during restore. The
    /// session counts as authenticated while `GET /auth/me` is in flight,
    /// exactly as a stored token does in the browser.
    pub fn adopt_token(&self, token: String) {
        let mut state = self.state.lock().expect("session state mutex poisoned");
        state.token = Some(token);
        self.expiry_handled.store(false, Ordering::SeqCst);
    }

    /// Attach the validated user record to the current token.
    pub fn set_user(&self, user: User) {
        let mut state = self.state.lock().expect("session state mutex poisoned");
        if state.token.is_none() {
            // Raced with an expiry; a user without a token would violate the
            // session invariant, so the late result is discarded.
            debug!("Dropping user record that arrived after logout");
            return;
        }
        state.user = Some(user);
    }

    /// Marks the initial restore attempt as finished, successful or not.
    pub fn finish_restore(&self) {
        let mut state = self.state.lock().expect("session state mutex poisoned");
        state.loading = false;
    }

    /// Clears durable storage and in-memory state. Idempotent; never
    /// navigates and never emits an event (callers decide where to go).
    pub async fn clear(&self) {
        {
            let mut state = self.state.lock().expect("session state mutex poisoned");
            state.token = None;
            state.user = None;
        }
        if let Err(e) = self.store.delete(TOKEN_KEY).await {
            warn!("Could not clear persisted token: {}", e);
        }
    }

    /// Global 401 policy: clear the session exactly as `clear()` does, then
    /// emit a single `Expired` event. The atomic latch plus the
    /// token-presence check make this a no-op for every concurrent 401 after
    /// the first, and for 401s received while already logged out.
    pub async fn expire(&self) {
        if self.expiry_handled.swap(true, Ordering::SeqCst) {
            return;
        }

        let was_authenticated = {
            let mut state = self.state.lock().expect("session state mutex poisoned");
            let had_token = state.token.is_some();
            state.token = None;
            state.user = None;
            had_token
        };
        if !was_authenticated {
            return;
        }

        if let Err(e) = self.store.delete(TOKEN_KEY).await {
            warn!("Could not clear persisted token: {}", e);
        }
        let _ = self.events.send(SessionEvent::Expired);
    }
}
