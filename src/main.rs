use std::sync::Arc;

use cheapdata_client::config::{load_config, print_schema};
use cheapdata_client::startup;
use cheapdata_client::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    // "--schema" prints the config JSON schema and exits, for tooling.
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = Arc::new(load_config());
    init_logging(&config.logging);

    if let Err(e) = startup::run(config).await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
