use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::plain_platform::PlainPushPlatform;
use super::unsupported::UnsupportedPlatform;
use crate::config::{PlatformBackend, PlatformConfig};
use crate::models::PushSubscription;

/// Notification permission as the platform reports it. Owned by the
/// platform; the client can only read it or ask for a prompt.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// The user has not decided yet; a prompt is allowed.
    Default,
    Granted,
    Denied,
}

/// The push service seam: permission prompts, background-worker
/// registration, and subscription create/lookup/teardown.
///
/// The platform owns every subscription's lifetime. Callers must re-query
/// `subscription()` rather than cache the record, so platform-side changes
/// are always observed.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Whether this platform can deliver push at all. Everything else fails
    /// soft when this is false.
    fn is_supported(&self) -> bool {
        true
    }

    /// Current notification permission, without prompting.
    fn permission(&self) -> Permission;

    /// Prompt the user. Only meaningful from `Permission::Default`; the
    /// returned value is the decision.
    async fn request_permission(&self) -> Result<Permission, String>;

    /// Make sure the background worker is registered and ready.
    async fn ensure_worker(&self) -> Result<(), String>;

    /// The currently active subscription, if any.
    async fn subscription(&self) -> Result<Option<PushSubscription>, String>;

    /// Create a subscription scoped to the server's public key.
    async fn subscribe(&self, server_key: &[u8]) -> Result<PushSubscription, String>;

    /// Tear down the active subscription. Returns whether one existed.
    async fn unsubscribe(&self) -> Result<bool, String>;
}

/// Creates a concrete platform implementation based on the PlatformConfig.
/// If `platform.enabled = false`, push is treated as unsupported.
pub fn create_platform(config: &PlatformConfig) -> Arc<dyn PushPlatform> {
    if !config.enabled {
        info!("Push platform is disabled. Treating push as unsupported.");
        return Arc::new(UnsupportedPlatform::new());
    }

    match &config.backend {
        Some(PlatformBackend::Plain(plain_config)) => {
            info!("Using plain push platform.");
            Arc::new(PlainPushPlatform::new(plain_config))
        }
        None => {
            info!("Platform is enabled but no backend config is provided; treating push as unsupported.");
            Arc::new(UnsupportedPlatform::new())
        }
    }
}
