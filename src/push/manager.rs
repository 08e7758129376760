use std::sync::Arc;

use tracing::{debug, info, warn};

use super::platform::{Permission, PushPlatform};
use crate::http::ApiClient;
use crate::models::push::VapidKeyResponse;
use crate::utils::encoding::decode_base64url;

/// Bridge between the platform push service and the backend's
/// push-recipient registry.
///
/// Every operation collapses failure to a boolean: these are invoked from
/// fire-and-forget UI affordances, so nothing here propagates an error to
/// the caller. Diagnostics go to the log.
pub struct PushManager {
    api: ApiClient,
    platform: Arc<dyn PushPlatform>,
}

impl PushManager {
    pub fn new(api: ApiClient, platform: Arc<dyn PushPlatform>) -> Self {
        PushManager { api, platform }
    }

    /// Whether an active push subscription currently exists, asked of the
    /// platform directly, never from cached application state.
    pub async fn check_status(&self) -> bool {
        if !self.platform.is_supported() {
            return false;
        }
        match self.platform.subscription().await {
            Ok(subscription) => subscription.is_some(),
            Err(e) => {
                debug!("Could not check push subscription: {}", e);
                false
            }
        }
    }

    /// Runs the full enablement sequence: permission, worker registration,
    /// server key fetch, platform subscription, backend mirror. Each step
    /// short-circuits to `false`, and a platform subscription whose backend
    /// mirror failed is torn down again so no half-enabled state remains.
    pub async fn subscribe(&self) -> bool {
        if !self.platform.is_supported() {
            debug!("Push is not supported; cannot subscribe");
            return false;
        }

        let granted = match self.platform.permission() {
            Permission::Granted => true,
            Permission::Denied => false,
            Permission::Default => match self.platform.request_permission().await {
                Ok(decision) => decision == Permission::Granted,
                Err(e) => {
                    warn!("Notification permission prompt failed: {}", e);
                    false
                }
            },
        };
        if !granted {
            info!("Notification permission denied");
            return false;
        }

        if let Err(e) = self.platform.ensure_worker().await {
            warn!("Background worker registration failed: {}", e);
            return false;
        }

        let vapid_key = match self
            .api
            .get_json::<VapidKeyResponse>("/notifications/push/vapid-key")
            .await
        {
            Ok(response) => response.public_key,
            Err(e) => {
                warn!("Could not fetch server push key: {}", e);
                return false;
            }
        };
        let server_key = match decode_base64url(&vapid_key) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Server push key is not valid base64url: {}", e);
                return false;
            }
        };

        let subscription = match self.platform.subscribe(&server_key).await {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!("Platform subscribe failed: {}", e);
                return false;
            }
        };

        if let Err(e) = self
            .api
            .post_json_unit("/notifications/push/subscribe", &subscription)
            .await
        {
            warn!("Could not register push subscription with backend: {}", e);
            if let Err(e) = self.platform.unsubscribe().await {
                warn!("Could not roll back platform subscription: {}", e);
            }
            return false;
        }

        info!("Push notification subscription successful");
        true
    }

    /// Tells the backend to forget the current subscription, then tears it
    /// down at the platform. No active subscription is a no-op success.
    pub async fn unsubscribe(&self) -> bool {
        let subscription = match self.platform.subscription().await {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!("Could not look up push subscription: {}", e);
                return false;
            }
        };
        if subscription.is_none() {
            debug!("No active push subscription; nothing to unsubscribe");
            return true;
        }

        if let Err(e) = self.api.post_unit("/notifications/push/unsubscribe").await {
            warn!("Could not deregister push subscription with backend: {}", e);
            return false;
        }

        match self.platform.unsubscribe().await {
            Ok(_) => {
                info!("Unsubscribed from push notifications");
                true
            }
            Err(e) => {
                warn!("Platform unsubscribe failed: {}", e);
                false
            }
        }
    }
}
