//! # shapegate-api: Binary Entry Point
//!
//! Reads configuration from the environment, registers every served
//! schema, then serves until SIGINT or SIGTERM.

use shapegate_api::bootstrap::bootstrap;
use shapegate_api::config::AppConfig;
use shapegate_api::server::{shutdown_signal, Server};
use shapegate_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    // Derivation failures stop the process here, before anything is bound.
    let state = bootstrap(config).map_err(|e| {
        tracing::error!("Bootstrap failed: {e}");
        e
    })?;

    let server = Server::bind(state).await?;
    server.serve(shutdown_signal()).await?;

    Ok(())
}
