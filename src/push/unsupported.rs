use async_trait::async_trait;

use super::platform::{Permission, PushPlatform};
use crate::models::PushSubscription;

/// A platform without push support. Every capability call fails with the
/// same error so the subscription manager collapses everything to `false`
/// instead of crashing the caller.
pub struct UnsupportedPlatform;

const NOT_SUPPORTED: &str = "Push is not supported on this platform";

impl UnsupportedPlatform {
    pub fn new() -> Self {
        UnsupportedPlatform
    }
}

impl Default for UnsupportedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushPlatform for UnsupportedPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    fn permission(&self) -> Permission {
        Permission::Denied
    }

    async fn request_permission(&self) -> Result<Permission, String> {
        Err(NOT_SUPPORTED.to_string())
    }

    async fn ensure_worker(&self) -> Result<(), String> {
        Err(NOT_SUPPORTED.to_string())
    }

    async fn subscription(&self) -> Result<Option<PushSubscription>, String> {
        Err(NOT_SUPPORTED.to_string())
    }

    async fn subscribe(&self, _server_key: &[u8]) -> Result<PushSubscription, String> {
        Err(NOT_SUPPORTED.to_string())
    }

    async fn unsubscribe(&self) -> Result<bool, String> {
        Err(NOT_SUPPORTED.to_string())
    }
}
