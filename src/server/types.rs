//! Server state and wire types.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::resolver::FaviconResolver;

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    /// The fallback chain, with its cache and counters
    pub resolver: FaviconResolver,
    /// When the server started, for uptime reporting
    pub start_time: Arc<Instant>,
}

impl AppState {
    /// Wraps a resolver, starting the uptime clock now.
    pub fn new(resolver: FaviconResolver) -> Self {
        Self {
            resolver,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Query string of `/s`
#[derive(Debug, Deserialize)]
pub struct IconQuery {
    /// Page or domain to resolve
    pub url: Option<String>,
    /// `true` (any case) bypasses the cache read
    #[serde(rename = "skipCache")]
    pub skip_cache: Option<String>,
}

impl IconQuery {
    /// Whether the cache read should be skipped.
    pub fn skip_cache(&self) -> bool {
        self.skip_cache
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Query string of `/clear`
#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    /// Page or domain whose cache entry is dropped
    pub url: Option<String>,
}

/// JSON response for `/`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `ok` while the server is answering
    pub status: &'static str,
    /// `requests`, `hits`, and `defaults`
    pub counters: BTreeMap<&'static str, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(skip: Option<&str>) -> IconQuery {
        IconQuery {
            url: Some("example.com".to_string()),
            skip_cache: skip.map(str::to_string),
        }
    }

    #[test]
    fn test_skip_cache_is_case_insensitive_true() {
        assert!(query(Some("true")).skip_cache());
        assert!(query(Some("TRUE")).skip_cache());
        assert!(query(Some("True")).skip_cache());
    }

    #[test]
    fn test_skip_cache_false_otherwise() {
        assert!(!query(None).skip_cache());
        assert!(!query(Some("1")).skip_cache());
        assert!(!query(Some("yes")).skip_cache());
        assert!(!query(Some("")).skip_cache());
    }
}
