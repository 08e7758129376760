use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::http::{ApiClient, ApiError};
use crate::models::{NotificationRecord, UnreadCount};
use crate::utils::throttle::LogThrottle;

/// Only the latest entries are kept in the dropdown feed.
const FEED_LIMIT: usize = 10;

/// One throttled failure line per window instead of one per failed tick.
const FAILURE_LOG_WINDOW: Duration = Duration::from_secs(300);

/// Latest known notification feed, published by the poller.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: u64,
}

/// Fetches the feed and the unread count in one round, the way the bell
/// refreshes. Either request failing fails the round.
pub async fn fetch_feed(api: &ApiClient) -> Result<FeedState, ApiError> {
    let (feed, count) = futures::join!(
        api.get_json::<Vec<NotificationRecord>>("/notifications"),
        api.get_json::<UnreadCount>("/notifications/unread/count"),
    );

    let mut notifications = feed?;
    notifications.truncate(FEED_LIMIT);
    Ok(FeedState {
        notifications,
        unread_count: count?.unread_count,
    })
}

/// Marks one notification as read. Callers refresh the feed afterwards.
pub async fn mark_read(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.put_unit(&format!("/notifications/{}/read", id)).await
}

/// Periodic background refresh of the notification feed.
///
/// Fetches immediately on start, then on every interval tick. Failures are
/// swallowed with a throttled debug line; a background refresh never
/// surfaces an error to the user, and never mutates session state on its own
/// (a 401 still flows through the HTTP client's global hook). The task is
/// tied to this handle's lifetime: `stop()` or dropping it tears the task
/// down, so no timer outlives its owner.
pub struct NotificationPoller {
    state: watch::Receiver<FeedState>,
    handle: JoinHandle<()>,
}

impl NotificationPoller {
    pub fn start(api: ApiClient, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(FeedState::default());
        let handle = tokio::spawn(async move {
            let mut throttle = LogThrottle::new(FAILURE_LOG_WINDOW);
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match fetch_feed(&api).await {
                    Ok(feed) => {
                        let _ = tx.send(feed);
                    }
                    Err(e) => {
                        if let Some(suppressed) = throttle.should_emit() {
                            debug!(suppressed, "Notification refresh failed: {}", e);
                        }
                    }
                }
            }
        });

        NotificationPoller { state: rx, handle }
    }

    /// A receiver for the published feed; `borrow()` is the latest state.
    pub fn state(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
