//! Catalog Cache Statistics Module
//!
//! Tracks cache performance metrics: fresh hits, misses that triggered an
//! outbound fetch, coalesced waiters and completed refreshes.

use serde::Serialize;

// == Catalog Stats ==
/// Tracks catalog cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    /// Reads served directly from a fresh cache entry
    pub hits: u64,
    /// Reads that triggered an outbound catalog fetch
    pub misses: u64,
    /// Reads that joined an already in-flight fetch instead of issuing
    /// their own
    pub coalesced: u64,
    /// Fetches that completed successfully and refreshed an entry
    pub refreshes: u64,
}

impl CatalogStats {
    // == Constructor ==
    /// Creates a new CatalogStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses + coalesced), or 0.0 if no reads have
    /// been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.coalesced;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the fresh-hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the coalesced-waiter counter.
    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    /// Increments the completed-refresh counter.
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }
}
