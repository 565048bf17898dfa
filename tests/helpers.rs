// Shared test helpers for building a resolver and server state.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::Arc;
use std::time::Duration;

use favicon_service::fetch::Fetcher;
use favicon_service::sniff::MagicSniffer;
use favicon_service::{AppState, Counters, FaviconResolver, Icon, IconValidator, LocationCache};

/// Location reported for the test default icon.
pub const DEFAULT_LOCATION: &str = "http://static.example.net/default_favicon.png";

/// Bytes of the test default icon.
pub const DEFAULT_ICON: &[u8] = b"\x89PNG\r\n\x1a\nintegration-default";

/// Creates a resolver with short timeouts and an in-memory cache.
pub fn test_resolver() -> FaviconResolver {
    let client = reqwest::Client::builder()
        .user_agent("favicon_service_test/1.0")
        .build()
        .expect("Failed to build client");
    FaviconResolver::new(
        Fetcher::new(Arc::new(client), Duration::from_secs(5), 1024 * 1024),
        IconValidator::new(Arc::new(MagicSniffer::new()), 1024 * 1024),
        LocationCache::in_memory(Duration::from_secs(60)),
        Arc::new(Counters::new()),
        Icon {
            data: DEFAULT_ICON.to_vec(),
            location: DEFAULT_LOCATION.to_string(),
            mime_type: "image/png".to_string(),
        },
        Duration::from_secs(10),
    )
}

/// Creates server state around a fresh test resolver.
pub fn test_state() -> AppState {
    AppState::new(test_resolver())
}

/// A 2000-byte ICO body.
#[allow(dead_code)] // Used by other test files
pub fn ico_body() -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x10, 0x10];
    data.resize(2000, 0x7f);
    data
}
