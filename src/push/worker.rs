use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::models::NotificationKind;

const DEFAULT_TITLE: &str = "CheapData";
const DEFAULT_ICON: &str = "/logo.svg";
const DEFAULT_TAG: &str = "cheapdata-notification";
const DEFAULT_URL: &str = "/";

/// Displays and closes OS-level notifications on behalf of the background
/// worker. The shipped implementation logs; a desktop shell would plug in
/// the real notification surface here.
pub trait Notifier: Send + Sync {
    fn show(&self, notification: &OsNotification) -> Result<(), String>;
    fn close(&self, tag: &str) -> Result<(), String>;
}

/// Notifier that writes notifications to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, notification: &OsNotification) -> Result<(), String> {
        info!(
            kind = notification.kind.as_str(),
            tag = notification.tag.as_str(),
            "{}: {}",
            notification.title,
            notification.body
        );
        Ok(())
    }

    fn close(&self, tag: &str) -> Result<(), String> {
        debug!("Closing notification '{}'", tag);
        Ok(())
    }
}

/// A fully-resolved notification, ready to display. Every field has been
/// defaulted; nothing optional remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub url: String,
    pub kind: NotificationKind,
}

/// Raw push payload as the backend sends it. Every field is optional on the
/// wire; `resolve` fills the gaps so a sparse payload still produces a
/// displayable notification.
#[derive(Deserialize, Debug, Default)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Older backend versions sent the text under "message".
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<NotificationKind>,
}

impl PushPayload {
    pub fn resolve(self) -> OsNotification {
        OsNotification {
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: self.body.or(self.message).unwrap_or_default(),
            badge: self.badge.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            icon: self.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            tag: self.tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
            url: self.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            kind: self.kind.unwrap_or_default(),
        }
    }
}

/// The background worker contract: receives push events out-of-process
/// relative to the app, renders OS notifications, and reacts to clicks.
pub struct PushWorker {
    notifier: Arc<dyn Notifier>,
}

impl PushWorker {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        PushWorker { notifier }
    }

    /// Handles a push event. Absent event data means nothing to display;
    /// undecodable data is dropped with a log line; anything that parses is
    /// displayed with per-field defaults. Never fails the caller.
    pub fn handle_push(&self, data: Option<&[u8]>) -> Option<OsNotification> {
        let data = data?;
        let payload: PushPayload = match serde_json::from_slice(data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Discarding undecodable push payload: {}", e);
                return None;
            }
        };

        let notification = payload.resolve();
        if let Err(e) = self.notifier.show(&notification) {
            warn!("Could not display notification: {}", e);
        }
        Some(notification)
    }

    /// A click closes the notification and yields the URL to focus/open.
    pub fn handle_click(&self, notification: &OsNotification) -> String {
        if let Err(e) = self.notifier.close(&notification.tag) {
            debug!("Could not close notification: {}", e);
        }
        notification.url.clone()
    }

    /// The platform rotated the subscription underneath us. No automatic
    /// re-subscription happens here: the worker has no user-facing
    /// permission context, so the subscription stays broken until the user
    /// re-enables push from the foreground.
    pub fn handle_subscription_change(&self) {
        warn!("Push subscription rotated by the platform; delivery stops until push is re-enabled");
    }
}
