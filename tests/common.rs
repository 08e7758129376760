use std::sync::Arc;

use cheapdata_client::config::{Config, ConfigV1};
use cheapdata_client::startup::build_context;
use cheapdata_client::state::AppContext;
use figment::{
    providers::{Format, Yaml},
    Figment,
};

/// Baseline test configuration: ephemeral store, plain push platform with
/// permission already granted. The API base URL is patched in per test.
pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "http://placeholder.invalid"
  timeout_in_ms: 5000
store:
  enabled: false
platform:
  enabled: true
  type: "plain"
  permission: "granted"
notifications:
  poll_interval_secs: 1
logging:
  level: "debug"
  format: "console"
"#;

pub fn load_test_config(yaml: &str, base_url: &str) -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(yaml))
        .extract()
        .expect("Failed to parse test config YAML");

    let Config::ConfigV1(mut cfg) = config;
    cfg.api.base_url = base_url.to_string();
    cfg
}

pub async fn build_test_context(base_url: &str) -> AppContext {
    build_context(Arc::new(load_test_config(TEST_CONFIG, base_url))).await
}

pub async fn build_test_context_from(yaml: &str, base_url: &str) -> AppContext {
    build_context(Arc::new(load_test_config(yaml, base_url))).await
}
