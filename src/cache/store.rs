//! Cache value and backend trait.

use std::time::Duration;

use crate::error_handling::CacheError;
use crate::validate::Icon;

/// What a cache entry records about a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    /// An icon was found; its `location` is an absolute URL.
    Hit(Icon),
    /// Every probe failed; serve the default icon without touching the network.
    DefaultSentinel,
}

impl CacheValue {
    /// Location recorded by this entry, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            CacheValue::Hit(icon) => Some(&icon.location),
            CacheValue::DefaultSentinel => None,
        }
    }
}

/// Storage backend for the location cache.
///
/// Operations are independently atomic per key; there are no multi-key
/// transactions.
pub trait LocationStore: Send + Sync {
    /// Returns the live entry for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<CacheValue>, CacheError>;

    /// Stores `value` under `key` for `ttl`, overwriting unconditionally.
    fn set(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Removes expired entries, returning how many were dropped.
    fn purge_expired(&self) -> Result<usize, CacheError>;
}
