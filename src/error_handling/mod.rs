//! Error handling and request counters.
//!
//! This module provides:
//! - The failure taxonomy (`ResolveError`, `FetchError`, `Rejection`, ...)
//! - The shared atomic counter store reported by the diagnostics endpoints
//!
//! Only `ResolveError::InvalidUrl` ever reaches a caller. Fetch failures,
//! rejections, and cache failures are recovered inside the fallback chain.

mod stats;
mod types;

// Re-export public API
pub use stats::Counters;
pub use types::{
    CacheError, Counter, FetchError, InitializationError, ProbeError, Rejection, ResolveError,
    SniffError,
};
