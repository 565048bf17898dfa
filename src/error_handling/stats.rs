//! Request counter tracking.
//!
//! This module provides a thread-safe counter store keyed by [`Counter`],
//! shared between the resolver and the diagnostics handlers.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::Counter;

/// Thread-safe counter store.
///
/// Every counter is initialized to zero on creation, so reads never miss.
/// Increments are independent atomics; there is no cross-counter snapshot
/// consistency.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct Counters {
    counters: HashMap<Counter, AtomicUsize>,
}

impl Counters {
    /// Creates a store with every counter at zero.
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for counter in Counter::iter() {
            counters.insert(counter, AtomicUsize::new(0));
        }

        Counters { counters }
    }

    /// Increment a counter.
    pub fn increment(&self, counter: Counter) {
        if let Some(value) = self.counters.get(&counter) {
            value.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter {:?} which is not in the map. \
                 This indicates a bug in Counters initialization.",
                counter
            );
        }
    }

    /// Get the current value of a counter.
    ///
    /// Returns 0 if the counter is not in the map (should never happen if properly initialized).
    pub fn get(&self, counter: Counter) -> usize {
        self.counters
            .get(&counter)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// All counters by name, in a stable order.
    pub fn snapshot(&self) -> BTreeMap<&'static str, usize> {
        Counter::iter().map(|c| (c.name(), self.get(c))).collect()
    }
}

impl Default for Counters {
    fn default() -> Self {
        Self::new()
    }
}
