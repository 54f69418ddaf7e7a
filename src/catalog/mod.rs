//! Catalog Module
//!
//! Read-through caching over the remote product catalog with staleness
//! tracking and single-flight fetch deduplication.

mod cache;
mod entry;
mod product;
mod source;
mod stats;

// Re-export public types
pub use cache::CatalogCache;
pub use entry::{current_timestamp_ms, CacheEntry, CachedValue, CatalogKey};
pub use product::{Product, Rating};
pub use source::{CatalogSource, HttpCatalogSource};
pub use stats::CatalogStats;
