//! HTTP transport for the resolver.
//!
//! Provides four endpoints:
//! - `/s?url=...&skipCache=...` - the resolved favicon bytes
//! - `/clear?url=...` - drops the cached outcome for a URL's domain
//! - `/` - JSON status with the request counters
//! - `/metrics` - Prometheus-compatible metrics
//!
//! Every request runs on its own task; the resolver, cache, and counters are
//! shared through [`AppState`].

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;

use handlers::{clear_handler, icon_handler, metrics_handler, status_handler};
pub use types::{AppState, ClearQuery, IconQuery, StatusResponse};

/// Builds the router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/s", get(icon_handler))
        .route("/clear", get(clear_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Binds `addr` and serves until `shutdown` is cancelled.
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind favicon server to {}: {}", addr, e))?;

    log::info!("Favicon server listening on http://{}/", addr);
    log::info!("  - Icons: http://{}/s?url=example.com", addr);
    log::info!("  - Status: http://{}/", addr);
    log::info!("  - Metrics: http://{}/metrics", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Favicon server error: {}", e))?;

    log::info!("Favicon server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_server_reports_bind_failure() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = occupied.local_addr().expect("local addr");

        let state = AppState::new(crate::test_support::resolver());
        let result = start_server(addr, state, CancellationToken::new()).await;
        let err = result.expect_err("port is already in use");
        assert!(err.to_string().contains("Failed to bind favicon server"));
    }

    #[tokio::test]
    async fn test_start_server_stops_on_shutdown() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("valid addr");
        let state = AppState::new(crate::test_support::resolver());
        assert!(start_server(addr, state, shutdown).await.is_ok());
    }
}
