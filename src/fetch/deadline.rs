//! Shared wall-clock budget for one resolution.

use std::time::{Duration, Instant};

/// Total time budget started when a request arrives.
///
/// Every fetch made on behalf of the request computes its own timeout from
/// [`Deadline::remaining`], so the whole fallback chain is bounded by one
/// budget regardless of how many probes it runs.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a new budget now.
    pub fn new(budget: Duration) -> Self {
        Self::starting_at(Instant::now(), budget)
    }

    /// Starts a budget at an explicit instant.
    pub fn starting_at(start: Instant, budget: Duration) -> Self {
        Self { start, budget }
    }

    /// Time spent since the budget started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left in the budget, or `None` once it is spent.
    pub fn remaining(&self) -> Option<Duration> {
        self.budget
            .checked_sub(self.elapsed())
            .filter(|left| !left.is_zero())
    }

    /// Whether the budget is spent.
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_none()
    }
}
