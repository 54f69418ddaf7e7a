//! Cache Entry Module
//!
//! Defines cache keys and the structure of individual catalog cache entries
//! with staleness tracking.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::Product;

// == Catalog Key ==
/// Key for a catalog cache entry: the full listing or a single product.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CatalogKey {
    /// The complete product listing (`GET /products`)
    AllProducts,
    /// A single product by id (`GET /products/{id}`)
    Product(u32),
}

// == Cached Value ==
/// Value stored under a [`CatalogKey`].
#[derive(Debug, Clone)]
pub enum CachedValue {
    /// Ordered full listing
    Listing(Vec<Product>),
    /// Single product record
    Single(Box<Product>),
}

// == Cache Entry ==
/// A successfully fetched catalog value with its fetch timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached value
    pub value: CachedValue,
    /// Fetch completion timestamp (Unix milliseconds)
    pub fetched_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry fetched at the current instant.
    pub fn new(value: CachedValue) -> Self {
        Self {
            value,
            fetched_at: current_timestamp_ms(),
        }
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived the staleness window.
    ///
    /// Boundary condition: an entry is stale strictly after the window has
    /// elapsed, so an entry fetched exactly `stale_after_ms` ago is still
    /// fresh. A stale entry is never served; it only marks that the next
    /// read must re-fetch.
    pub fn is_stale(&self, stale_after_ms: u64) -> bool {
        current_timestamp_ms().saturating_sub(self.fetched_at) > stale_after_ms
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
