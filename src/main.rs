//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `favicon_service` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Background cache maintenance and graceful shutdown
//!
//! All core functionality is implemented in the library crate.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use favicon_service::initialization::init_logger_with;
use favicon_service::{
    spawn_purge_task, start_server, AppState, Config, Counters, FaviconResolver, Opt,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let counters = Arc::new(Counters::new());
    let resolver = FaviconResolver::from_config(&config, counters)
        .context("Failed to initialize favicon resolver")?;

    let shutdown = CancellationToken::new();
    let purge = spawn_purge_task(
        resolver.cache().clone(),
        Duration::from_secs(config.cache_purge_interval_secs),
        shutdown.clone(),
    );

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Received Ctrl-C, shutting down");
                signal_token.cancel();
            }
            Err(e) => log::error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    let result = start_server(config.listen_addr, AppState::new(resolver), shutdown.clone()).await;

    shutdown.cancel();
    if let Err(e) = purge.await {
        log::warn!("Cache purge task ended abnormally: {}", e);
    }

    result
}
