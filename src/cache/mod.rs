//! Location cache.
//!
//! Maps a `scheme://host[:port]` domain to the icon discovered for it, or to
//! the default sentinel when the fallback chain came up empty. Every entry
//! expires after the configured TTL.
//!
//! The cache is best-effort: [`LocationCache`] logs backend failures and
//! reports them as misses, so a broken backend degrades to "resolve again"
//! rather than to an error response.

mod memory;
mod store;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use memory::MemoryLocationStore;
pub use store::{CacheValue, LocationStore};

/// Best-effort front end over a [`LocationStore`].
#[derive(Clone)]
pub struct LocationCache {
    store: Arc<dyn LocationStore>,
    ttl: Duration,
}

impl LocationCache {
    /// Wraps `store`; every write uses `ttl`.
    pub fn new(store: Arc<dyn LocationStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// In-memory cache with the given TTL and the default memory budget.
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryLocationStore::new()), ttl)
    }

    /// In-memory cache with the given TTL, holding at most `max_bytes`.
    pub fn in_memory_bounded(ttl: Duration, max_bytes: usize) -> Self {
        Self::new(Arc::new(MemoryLocationStore::with_max_bytes(max_bytes)), ttl)
    }

    /// Looks up `domain`. Backend failures read as a miss.
    pub fn get(&self, domain: &str) -> Option<CacheValue> {
        match self.store.get(domain) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Cache read for {} failed: {}", domain, e);
                None
            }
        }
    }

    /// Stores `value` under `domain`, overwriting any existing entry.
    pub fn put(&self, domain: &str, value: CacheValue) {
        if let Err(e) = self.store.set(domain, value, self.ttl) {
            log::error!("Cache write for {} failed: {}", domain, e);
        }
    }

    /// Stores `value` under each distinct domain.
    ///
    /// Each write is independent; a reader may briefly see one key updated and
    /// not the other.
    pub fn put_all<'a>(&self, domains: impl IntoIterator<Item = &'a str>, value: &CacheValue) {
        let distinct: BTreeSet<&str> = domains.into_iter().collect();
        for domain in distinct {
            self.put(domain, value.clone());
        }
    }

    /// Removes the entry for `domain`.
    pub fn invalidate(&self, domain: &str) {
        match self.store.remove(domain) {
            Ok(()) => log::info!("Cache entry for {} invalidated", domain),
            Err(e) => log::error!("Cache invalidation for {} failed: {}", domain, e),
        }
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        match self.store.purge_expired() {
            Ok(evicted) => {
                if evicted > 0 {
                    log::info!("Evicted {} expired cache entries", evicted);
                }
                evicted
            }
            Err(e) => {
                log::error!("Cache purge failed: {}", e);
                0
            }
        }
    }
}

/// Spawns a task that sweeps expired entries every `interval` until
/// `shutdown` is cancelled.
pub fn spawn_purge_task(
    cache: LocationCache,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    // tokio::time::interval panics on a zero period
    let period = interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    cache.purge_expired();
                }
            }
        }
        log::debug!("Cache purge task stopped");
    })
}
