use std::sync::Mutex;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::platform::{Permission, PushPlatform};
use crate::models::{PushSubscription, SubscriptionKeys};
use crate::utils::encoding::encode_base64url;

fn default_grant_on_prompt() -> bool {
    true
}

fn default_endpoint_base() -> String {
    "https://push.cheapdata.local/send".to_string()
}

/// Config for the plain (in-process) push platform used in development and
/// tests: the permission flow is statically configured instead of asking a
/// real user.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainPlatformConfig {
    /// Permission state at startup.
    #[serde(default = "PlainPlatformConfig::default_permission")]
    pub permission: Permission,
    /// What a permission prompt resolves to.
    #[serde(default = "default_grant_on_prompt")]
    pub grant_on_prompt: bool,
    /// Base URL for minted subscription endpoints.
    #[serde(default = "default_endpoint_base")]
    pub endpoint_base: String,
}

impl PlainPlatformConfig {
    fn default_permission() -> Permission {
        Permission::Default
    }
}

#[derive(Debug)]
struct PlainState {
    permission: Permission,
    worker_registered: bool,
    subscription: Option<PushSubscription>,
}

/// An in-process push service. Subscriptions are minted locally with
/// uuid-derived endpoints and random key material; nothing is delivered,
/// but the whole subscribe/lookup/unsubscribe lifecycle behaves like the
/// real thing.
pub struct PlainPushPlatform {
    config: PlainPlatformConfig,
    state: Mutex<PlainState>,
}

impl PlainPushPlatform {
    pub fn new(config: &PlainPlatformConfig) -> Self {
        debug!(
            "Creating plain push platform with permission {:?}",
            config.permission
        );
        PlainPushPlatform {
            state: Mutex::new(PlainState {
                permission: config.permission,
                worker_registered: false,
                subscription: None,
            }),
            config: config.clone(),
        }
    }

    fn mint_subscription(&self) -> PushSubscription {
        // 0x04 prefix + 32 random bytes approximates an uncompressed P-256
        // point; real key agreement never happens on this platform.
        let mut p256dh = vec![0x04];
        p256dh.extend_from_slice(Uuid::new_v4().as_bytes());
        p256dh.extend_from_slice(Uuid::new_v4().as_bytes());

        PushSubscription {
            endpoint: format!(
                "{}/{}",
                self.config.endpoint_base.trim_end_matches('/'),
                Uuid::new_v4()
            ),
            keys: SubscriptionKeys {
                p256dh: encode_base64url(&p256dh),
                auth: encode_base64url(Uuid::new_v4().as_bytes()),
            },
        }
    }
}

#[async_trait]
impl PushPlatform for PlainPushPlatform {
    fn permission(&self) -> Permission {
        self.state
            .lock()
            .expect("push platform mutex poisoned")
            .permission
    }

    async fn request_permission(&self) -> Result<Permission, String> {
        let mut state = self.state.lock().expect("push platform mutex poisoned");
        if state.permission == Permission::Default {
            state.permission = if self.config.grant_on_prompt {
                Permission::Granted
            } else {
                Permission::Denied
            };
            info!("Notification permission prompt resolved: {:?}", state.permission);
        }
        Ok(state.permission)
    }

    async fn ensure_worker(&self) -> Result<(), String> {
        let mut state = self.state.lock().expect("push platform mutex poisoned");
        if !state.worker_registered {
            state.worker_registered = true;
            debug!("Background worker registered");
        }
        Ok(())
    }

    async fn subscription(&self) -> Result<Option<PushSubscription>, String> {
        let state = self.state.lock().expect("push platform mutex poisoned");
        Ok(state.subscription.clone())
    }

    async fn subscribe(&self, server_key: &[u8]) -> Result<PushSubscription, String> {
        if server_key.is_empty() {
            return Err("Server key must not be empty".to_string());
        }

        let mut state = self.state.lock().expect("push platform mutex poisoned");
        if state.permission != Permission::Granted {
            return Err("Notification permission not granted".to_string());
        }
        if !state.worker_registered {
            return Err("No background worker registered".to_string());
        }

        // Re-subscribing replaces the previous record, as push services do.
        let subscription = {
            let minted = self.mint_subscription();
            state.subscription = Some(minted.clone());
            minted
        };
        Ok(subscription)
    }

    async fn unsubscribe(&self) -> Result<bool, String> {
        let mut state = self.state.lock().expect("push platform mutex poisoned");
        Ok(state.subscription.take().is_some())
    }
}
