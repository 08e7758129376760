use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::push::plain_platform::PlainPlatformConfig;

/// A wrapper for the push-platform configuration:
/// - enabled: if false, push is treated as unsupported (every capability
///   check fails soft and `check_status` reports false).
/// - backend: the actual platform backend.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct PlatformConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<PlatformBackend>,
}

/// The existing push-platform backends, differentiated via a "type" tag.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum PlatformBackend {
    #[serde(rename = "plain")]
    Plain(PlainPlatformConfig),
}
