//! # Courier Console Server
//!
//! Entry point of the admin console gateway.

use courier_config::{AppConfig, ConfigLoader};
use courier_core::CourierResult;
use courier_server::{
    app::AppBuilder,
    startup::{init_logging, init_metrics, print_startup_info, shutdown_signal},
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    info!("Starting Courier Console Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> CourierResult<()> {
    let metrics = init_metrics(&config.observability);
    print_startup_info(&config);

    let mut builder = AppBuilder::new().with_config(config);
    if let Some(handle) = metrics {
        builder = builder.with_metrics(handle);
    }

    builder.run(shutdown_signal()).await
}
