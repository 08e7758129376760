//! Application startup and run loop.
//!
//! This module wires up the application context (preference store, HTTP
//! client, session and push managers), restores the persisted session, and
//! runs the background notification poll until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::ConfigV1;
use crate::http::ApiClient;
use crate::notifications::NotificationPoller;
use crate::push::{create_platform, PushManager};
use crate::session::core::SessionCore;
use crate::session::{evaluate, Access, GuardDecision, SessionEvent, SessionManager};
use crate::state::AppContext;
use crate::store::create_store;
use crate::theme::ThemeManager;

/// Builds the application context from configuration: the store, the
/// session core shared by the manager and the HTTP client, the push
/// platform, and the managers on top.
pub async fn build_context(config: Arc<ConfigV1>) -> AppContext {
    let store = create_store(&config.store).await;
    let platform = create_platform(&config.platform);

    let core = Arc::new(SessionCore::new(store.clone()));
    let api = ApiClient::new(&config.api, core.clone());
    let session = Arc::new(SessionManager::new(core, api.clone()));
    let push = Arc::new(PushManager::new(api.clone(), platform));
    let theme = ThemeManager::new(store.clone());

    AppContext {
        config,
        store,
        api,
        session,
        push,
        theme,
    }
}

/// Initializes the client and runs it until ctrl-c.
///
/// Restores the session first (route decisions wait on this), then starts
/// the notification poller and watches for session expiry.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting CheapData client against {}", config.api.base_url);

    let context = build_context(config.clone()).await;
    info!("Theme preference: {}", context.theme.load().await.as_str());

    context.session.restore().await;

    match evaluate(&context.session.snapshot(), Access::Authenticated) {
        GuardDecision::Render => {
            let user = context.session.current_user();
            info!(
                "Session active for '{}'",
                user.map(|u| u.email).unwrap_or_default()
            );
        }
        GuardDecision::RedirectToLogin => info!("No active session; login required"),
        // restore() has completed, and the dashboard gate is not admin-gated.
        GuardDecision::Wait | GuardDecision::RedirectToDashboard => {}
    }

    let poller = NotificationPoller::start(
        context.api.clone(),
        Duration::from_secs(config.notifications.poll_interval_secs),
    );
    let mut events = context.session.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            changed = events.changed() => {
                if changed.is_err() {
                    break;
                }
                if *events.borrow_and_update() == SessionEvent::Expired {
                    info!("Session expired; returning to the login entry point");
                }
            }
        }
    }

    poller.stop();
    Ok(())
}
