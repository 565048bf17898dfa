//! In-process cache backend.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::store::{CacheValue, LocationStore};
use crate::config::CACHE_MAX_BYTES;
use crate::error_handling::CacheError;

/// Bookkeeping charged to every entry on top of its key and payload.
const ENTRY_OVERHEAD: usize = 64;

struct Entry {
    value: CacheValue,
    /// `None` when the TTL is too large to represent as an `Instant`.
    expires_at: Option<Instant>,
    /// Bytes this entry counts against the budget.
    cost: usize,
    /// Tick of the last read or write; the smallest tick is evicted first.
    last_used: AtomicU64,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

fn entry_cost(key: &str, value: &CacheValue) -> usize {
    let payload = match value {
        CacheValue::Hit(icon) => icon.data.len() + icon.location.len() + icon.mime_type.len(),
        CacheValue::DefaultSentinel => 0,
    };
    ENTRY_OVERHEAD + key.len() + payload
}

/// Concurrent in-memory store with per-entry expiry and a memory budget.
///
/// Expired entries are dropped lazily on read and in bulk by
/// [`LocationStore::purge_expired`]. When a write pushes the store over its
/// byte budget, expired entries are purged first, then the least recently
/// used entries are evicted until it fits again. An entry larger than the
/// whole budget is therefore never retained.
pub struct MemoryLocationStore {
    entries: DashMap<String, Entry>,
    total_bytes: AtomicUsize,
    max_bytes: usize,
    clock: AtomicU64,
}

impl Default for MemoryLocationStore {
    fn default() -> Self {
        Self::with_max_bytes(CACHE_MAX_BYTES)
    }
}

impl MemoryLocationStore {
    /// Creates an empty store with the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store holding at most `max_bytes` of entries.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            total_bytes: AtomicUsize::new(0),
            max_bytes,
            clock: AtomicU64::new(0),
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently charged against the budget.
    pub fn size_bytes(&self) -> usize {
        self.total_bytes.load(Ordering::SeqCst)
    }

    /// The configured budget.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn discard(&self, entry: &Entry) {
        self.total_bytes.fetch_sub(entry.cost, Ordering::SeqCst);
    }

    fn remove_entry(&self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some((_, entry)) => {
                self.discard(&entry);
                true
            }
            None => false,
        }
    }

    fn purge_expired_entries(&self) -> usize {
        let now = Instant::now();
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let live = !entry.is_expired(now);
            if !live {
                self.total_bytes.fetch_sub(entry.cost, Ordering::SeqCst);
                evicted += 1;
            }
            live
        });
        evicted
    }

    fn least_recently_used(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|entry| entry.value().last_used.load(Ordering::Relaxed))
            .map(|entry| entry.key().clone())
    }

    fn enforce_budget(&self) {
        if self.size_bytes() <= self.max_bytes {
            return;
        }
        let expired = self.purge_expired_entries();
        if expired > 0 {
            log::debug!("Cache over budget: purged {} expired entries", expired);
        }

        while self.size_bytes() > self.max_bytes {
            let Some(victim) = self.least_recently_used() else {
                break;
            };
            if self.remove_entry(&victim) {
                log::debug!("Cache over budget: evicted {}", victim);
            }
        }
    }
}

impl LocationStore for MemoryLocationStore {
    fn get(&self, key: &str) -> Result<Option<CacheValue>, CacheError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                entry.last_used.store(self.tick(), Ordering::Relaxed);
                return Ok(Some(entry.value.clone()));
            }
        }
        // Guard dropped above; removing while holding it would deadlock the shard.
        if let Some((_, entry)) = self.entries.remove_if(key, |_, entry| entry.is_expired(now)) {
            self.discard(&entry);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<(), CacheError> {
        let cost = entry_cost(key, &value);
        let entry = Entry {
            value,
            expires_at: Instant::now().checked_add(ttl),
            cost,
            last_used: AtomicU64::new(self.tick()),
        };
        // Charge before the entry becomes visible so a concurrent removal
        // never subtracts it first.
        self.total_bytes.fetch_add(cost, Ordering::SeqCst);
        if let Some(replaced) = self.entries.insert(key.to_string(), entry) {
            self.discard(&replaced);
        }
        self.enforce_budget();
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.remove_entry(key);
        Ok(())
    }

    fn purge_expired(&self) -> Result<usize, CacheError> {
        Ok(self.purge_expired_entries())
    }
}
