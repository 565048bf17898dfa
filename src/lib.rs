//! favicon_service library: favicon resolution behind a location cache
//!
//! This library resolves the favicon of an arbitrary website. Given any URL it
//! runs an ordered fallback chain (cache, `<link rel="icon">` on the page,
//! `/favicon.ico`, then the same probes on the parent and `www` domains) and
//! returns validated icon bytes with a sniffed MIME type. When nothing is
//! found, the built-in default icon is returned and remembered.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use favicon_service::{Config, Counters, FaviconResolver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let resolver = FaviconResolver::from_config(&config, Arc::new(Counters::new()))?;
//!
//! let resolution = resolver.resolve("example.com", false).await?;
//! println!(
//!     "{} ({}, {} bytes)",
//!     resolution.icon.location,
//!     resolution.icon.mime_type,
//!     resolution.icon.data.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod domain;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod parse;
pub mod resolver;
pub mod server;
pub mod sniff;
mod utils;
pub mod validate;

// Re-export public API
pub use cache::{spawn_purge_task, CacheValue, LocationCache, LocationStore, MemoryLocationStore};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{
    CacheError, Counter, Counters, FetchError, InitializationError, ProbeError, Rejection,
    ResolveError, SniffError,
};
pub use resolver::{FaviconResolver, Resolution};
pub use server::{router, start_server, AppState};
pub use validate::{Icon, IconValidator};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::cache::LocationCache;
    use crate::error_handling::Counters;
    use crate::fetch::Fetcher;
    use crate::resolver::FaviconResolver;
    use crate::sniff::MagicSniffer;
    use crate::validate::{Icon, IconValidator};

    /// Resolver with short timeouts, an in-memory cache, and a tiny default icon.
    pub(crate) fn resolver() -> FaviconResolver {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build client");
        FaviconResolver::new(
            Fetcher::new(Arc::new(client), Duration::from_secs(2), 1024 * 1024),
            IconValidator::new(Arc::new(MagicSniffer::new()), 1024 * 1024),
            LocationCache::in_memory(Duration::from_secs(60)),
            Arc::new(Counters::new()),
            Icon {
                data: b"\x89PNG\r\n\x1a\ntest-default".to_vec(),
                location: "http://static.example.net/default.png".to_string(),
                mime_type: "image/png".to_string(),
            },
            Duration::from_secs(2),
        )
    }
}
