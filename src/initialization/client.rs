//! HTTP client initialization.
//!
//! This module builds the single HTTP client shared by every probe.

use std::sync::Arc;

use crate::config::{Config, MAX_REDIRECT_HOPS};
use reqwest::ClientBuilder;

/// Initializes the HTTP client used by the fetcher.
///
/// Creates a `reqwest::Client` configured with:
/// - The fixed User-Agent from configuration
/// - Connect and overall timeouts equal to the per-connection timeout
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS`)
///
/// No cookie store is attached: cookies are forwarded explicitly, per request,
/// so nothing leaks between unrelated sites.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .connect_timeout(config.connection_timeout())
        .timeout(config.connection_timeout())
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}
