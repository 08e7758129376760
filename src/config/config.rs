use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::platform::PlatformConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0, containing the backend API endpoint, the
/// preference store, the push platform, polling, and logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub platform: PlatformConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

/// Where the backend REST API lives. The base URL is the part that differs
/// between development and production deployments.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ApiConfig {
    /// Base URL all request paths are joined to, e.g. "http://localhost:8000/api".
    pub base_url: String,
    /// Per-request timeout, applied by the HTTP client.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    30_000
}

/// Settings for the background notification poll.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct NotificationsConfig {
    /// Seconds between feed refreshes.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    30
}

/// Load config from a YAML file named "config.yaml" in the current directory,
/// with CHEAPDATA_-prefixed environment variables taking precedence
/// (e.g. CHEAPDATA_API__BASE_URL overrides api.base_url).
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("CHEAPDATA_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}
