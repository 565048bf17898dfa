//! Configuration constants.
//!
//! This module defines the fixed operational parameters of the resolver:
//! timeouts, icon size bounds, the MIME blacklist, and cache lifetimes.

use std::time::Duration;

// Network operation timeouts
/// Per-connection timeout in seconds.
/// A single fetch never waits longer than this, even when more of the
/// request budget remains.
pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
/// Total wall-clock budget for resolving one request, in seconds.
/// Every probe in the fallback chain draws from this one budget.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Fixed User-Agent string sent with every outbound request.
///
/// Some sites serve a different (or no) favicon to unknown clients, so the
/// resolver identifies as a desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows; U; Windows NT 6.1; en-US; rv:1.9.2.13) Gecko/20101203 Firefox/3.6.13";

// Icon acceptance rules
/// Smallest plausible icon body in bytes. Smaller bodies are logged, not rejected.
pub const MIN_ICON_LENGTH: usize = 100;
/// Largest plausible icon body in bytes. Larger bodies are logged, not rejected.
pub const MAX_ICON_LENGTH: usize = 20_000;

/// Sniffed MIME types that are never accepted as an icon.
/// Error pages and soft-404s usually sniff as one of these.
pub const ICON_MIMETYPE_BLACKLIST: &[&str] = &["application/xml", "text/html", "text/plain"];

/// Legacy MIME alias reported by some magic databases for `.ico` files.
pub const LEGACY_ICO_MIME: &str = "image/x-ico";
/// Canonical MIME type for `.ico` files.
pub const ICO_MIME: &str = "image/x-icon";

// Response and body size limits
/// Maximum response body size in bytes (2MB).
/// Larger responses are abandoned to prevent memory exhaustion.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Location cache
/// Lifetime of every location cache entry, including the default sentinel (28 days).
pub const CACHE_TTL: Duration = Duration::from_secs(2_419_200);
/// How often expired cache entries are swept out of memory.
pub const CACHE_PURGE_INTERVAL_SECS: u64 = 60 * 60;
/// Memory budget of the in-process cache in bytes (64MB).
/// Least recently used entries are evicted once it is exceeded.
pub const CACHE_MAX_BYTES: usize = 64 * 1024 * 1024;

// Default icon
/// Location reported for the built-in default icon.
pub const DEFAULT_FAVICON_LOC: &str =
    "http://d3gibmfbqm9w63.cloudfront.net/img/static/default_favicon.png";
/// MIME type of the built-in default icon.
pub const DEFAULT_FAVICON_MIME: &str = "image/png";

// Response caching headers
/// `max-age` sent to browsers for resolved icons (30 days).
pub const BROWSER_CACHE_MAX_AGE_SECS: i64 = 2_592_000;

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

// Redirect handling
/// Maximum number of transport-level redirect hops followed per fetch.
pub const MAX_REDIRECT_HOPS: usize = 10;
