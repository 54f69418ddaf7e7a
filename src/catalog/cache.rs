//! Catalog Cache Module
//!
//! Read-through cache over a [`CatalogSource`] with single-flight fetch
//! deduplication: for every key there is at most one outbound fetch at any
//! time, and every concurrent reader of that key awaits the same outcome.
//!
//! Staleness only gates re-fetch timing. A fresh entry is served directly;
//! a stale or absent entry makes the caller wait for a (possibly shared)
//! fetch. There is no eviction: entries live for the process lifetime and
//! memory is bounded by catalog size.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use crate::catalog::{CacheEntry, CachedValue, CatalogKey, CatalogSource, CatalogStats, Product};
use crate::error::{Result, StoreError};

/// Outcome of a single fetch, fanned out to every coalesced waiter.
type FetchOutcome = Result<CachedValue>;

// == In-Flight Slot ==
/// One outstanding fetch: its fan-out channel plus an id so a waiter can
/// tell whether a slot still belongs to the flight it subscribed to.
struct Flight {
    id: u64,
    tx: broadcast::Sender<FetchOutcome>,
}

// == Catalog State ==
/// Mutable cache state behind one lock.
#[derive(Default)]
struct CatalogState {
    /// Successfully fetched entries by key
    entries: HashMap<CatalogKey, CacheEntry>,
    /// Single-slot in-flight guard per key; presence means a fetch for that
    /// key is outstanding
    in_flight: HashMap<CatalogKey, Flight>,
    /// Id handed to the next flight
    next_flight_id: u64,
    /// Read/fetch counters
    stats: CatalogStats,
}

// == Catalog Cache ==
/// Read-through product cache with request deduplication.
///
/// Cloning is cheap; clones share the same state and source.
#[derive(Clone)]
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    state: Arc<Mutex<CatalogState>>,
    stale_after_ms: u64,
}

impl CatalogCache {
    // == Constructor ==
    /// Creates a cache over the given source with the given staleness window.
    pub fn new(source: Arc<dyn CatalogSource>, stale_after: Duration) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CatalogState::default())),
            stale_after_ms: stale_after.as_millis() as u64,
        }
    }

    // == Get All ==
    /// Returns the full product listing, fetching it if the cached entry is
    /// stale or absent.
    pub async fn get_all(&self) -> Result<Vec<Product>> {
        match self.lookup(CatalogKey::AllProducts).await? {
            CachedValue::Listing(products) => Ok(products),
            CachedValue::Single(_) => Err(StoreError::Internal(
                "listing key resolved to a single product".to_string(),
            )),
        }
    }

    // == Get By Id ==
    /// Returns a single product by id, fetching it if the cached entry is
    /// stale or absent.
    ///
    /// An id the catalog does not know yields [`StoreError::NotFound`] and
    /// caches nothing.
    pub async fn get_by_id(&self, id: u32) -> Result<Product> {
        match self.lookup(CatalogKey::Product(id)).await? {
            CachedValue::Single(product) => Ok(*product),
            CachedValue::Listing(_) => Err(StoreError::Internal(
                "product key resolved to a listing".to_string(),
            )),
        }
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub async fn stats(&self) -> CatalogStats {
        self.state.lock().await.stats.clone()
    }

    // == Lookup ==
    /// Core read path: serve fresh, join an in-flight fetch, or lead a new
    /// one.
    async fn lookup(&self, key: CatalogKey) -> FetchOutcome {
        loop {
            let (flight_id, mut rx) = {
                let mut state = self.state.lock().await;

                if let Some(entry) = state.entries.get(&key) {
                    if !entry.is_stale(self.stale_after_ms) {
                        let value = entry.value.clone();
                        state.stats.record_hit();
                        return Ok(value);
                    }
                }

                if let Some(flight) = state.in_flight.get(&key) {
                    // A fetch for this key is already outstanding; attach to
                    // its outcome instead of issuing a duplicate request.
                    let id = flight.id;
                    let rx = flight.tx.subscribe();
                    state.stats.record_coalesced();
                    (id, rx)
                } else {
                    // No fetch outstanding: become the leader. The single
                    // broadcast message fans the outcome out to every waiter.
                    let id = state.next_flight_id;
                    state.next_flight_id += 1;
                    state.stats.record_miss();
                    let (tx, rx) = broadcast::channel(1);
                    state.in_flight.insert(key.clone(), Flight { id, tx: tx.clone() });
                    self.spawn_fetch(key.clone(), id, tx);
                    (id, rx)
                }
            };

            match rx.recv().await {
                Ok(outcome) => return outcome,
                // The in-flight channel closed without an outcome (fetch task
                // torn down, e.g. at runtime shutdown). Clear the slot if it
                // still belongs to the flight this waiter subscribed to, then
                // retry from the top so the entry reverts to a normal
                // stale/absent read instead of a poisoned error.
                Err(_) => {
                    debug!(?key, "in-flight fetch dropped without outcome, retrying");
                    let mut state = self.state.lock().await;
                    if state
                        .in_flight
                        .get(&key)
                        .is_some_and(|flight| flight.id == flight_id)
                    {
                        state.in_flight.remove(&key);
                    }
                }
            }
        }
    }

    // == Spawn Fetch ==
    /// Runs the fetch on a detached task so an abandoned caller never
    /// cancels a fetch other callers are waiting on.
    ///
    /// The slot removal and the fan-out run on a task whose body cannot
    /// panic, so every waiter always receives an outcome: a source that
    /// panics surfaces as a [`StoreError::FetchFailure`] rather than a
    /// silently dropped channel.
    fn spawn_fetch(&self, key: CatalogKey, flight_id: u64, tx: broadcast::Sender<FetchOutcome>) {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            // The source call gets its own task so a panic inside it comes
            // back as a join error here instead of tearing down the
            // cleanup-and-send below.
            let fetch = {
                let key = key.clone();
                tokio::spawn(async move {
                    match &key {
                        CatalogKey::AllProducts => {
                            source.fetch_all().await.map(CachedValue::Listing)
                        }
                        CatalogKey::Product(id) => source
                            .fetch_by_id(*id)
                            .await
                            .map(|p| CachedValue::Single(Box::new(p))),
                    }
                })
            };

            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(e) => Err(StoreError::FetchFailure(format!(
                    "catalog fetch task failed: {e}"
                ))),
            };

            {
                let mut state = state.lock().await;
                if state
                    .in_flight
                    .get(&key)
                    .is_some_and(|flight| flight.id == flight_id)
                {
                    state.in_flight.remove(&key);
                }
                match &outcome {
                    Ok(value) => {
                        state.stats.record_refresh();
                        state.entries.insert(key.clone(), CacheEntry::new(value.clone()));
                    }
                    // Failures cache nothing. A prior (stale) entry stays as
                    // it was; the next read simply fetches again.
                    Err(e) => warn!(?key, error = %e, "catalog fetch failed"),
                }
            }

            // Send after releasing the lock; waiters subscribed before the
            // slot was removed, so none can miss the message.
            let _ = tx.send(outcome);
        });
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::catalog::Rating;

    fn sample_product(id: u32) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price: dec!(19.99),
            description: "desc".to_string(),
            category: "cat".to_string(),
            image: "https://example.com/p.jpg".to_string(),
            rating: Rating {
                rate: dec!(4.0),
                count: 3,
            },
        }
    }

    /// Scripted source that counts outbound fetches.
    struct CountingSource {
        all_calls: AtomicU32,
        by_id_calls: AtomicU32,
        fail: bool,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                all_calls: AtomicU32::new(0),
                by_id_calls: AtomicU32::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<Product>> {
            self.all_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::FetchFailure("scripted failure".to_string()));
            }
            Ok(vec![sample_product(1), sample_product(2)])
        }

        async fn fetch_by_id(&self, id: u32) -> Result<Product> {
            self.by_id_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::FetchFailure("scripted failure".to_string()));
            }
            if id == 999 {
                return Err(StoreError::NotFound(format!("no product {id}")));
            }
            Ok(sample_product(id))
        }
    }

    fn cache_over(source: CountingSource) -> (CatalogCache, Arc<CountingSource>) {
        let source = Arc::new(source);
        let cache = CatalogCache::new(source.clone(), Duration::from_secs(300));
        (cache, source)
    }

    #[tokio::test]
    async fn test_get_all_fetches_once_then_serves_fresh() {
        let (cache, source) = cache_over(CountingSource::new());

        let first = cache.get_all().await.unwrap();
        let second = cache.get_all().await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(source.all_calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.refreshes, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_distinct_keys_fetch_separately() {
        let (cache, source) = cache_over(CountingSource::new());

        let p1 = cache.get_by_id(1).await.unwrap();
        let p2 = cache.get_by_id(2).await.unwrap();
        let p1_again = cache.get_by_id(1).await.unwrap();

        assert_eq!(p1.id, 1);
        assert_eq!(p2.id, 2);
        assert_eq!(p1, p1_again);
        assert_eq!(source.by_id_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_not_found_caches_nothing() {
        let (cache, source) = cache_over(CountingSource::new());

        let first = cache.get_by_id(999).await;
        assert!(matches!(first, Err(StoreError::NotFound(_))));

        // A second read goes back upstream: absence is not memoized.
        let second = cache.get_by_id(999).await;
        assert!(matches!(second, Err(StoreError::NotFound(_))));
        assert_eq!(source.by_id_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_clears_in_flight_and_allows_retry() {
        let (cache, source) = cache_over(CountingSource::failing());

        let first = cache.get_all().await;
        assert!(matches!(first, Err(StoreError::FetchFailure(_))));

        // The failed fetch must not poison the slot; a retry fetches again.
        let second = cache.get_all().await;
        assert!(matches!(second, Err(StoreError::FetchFailure(_))));
        assert_eq!(source.all_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().await.refreshes, 0);
    }

    #[tokio::test]
    async fn test_stale_entry_triggers_refetch() {
        let (cache, source) = cache_over(CountingSource::new());

        cache.get_all().await.unwrap();

        // Backdate the entry past the staleness window.
        {
            let mut state = cache.state.lock().await;
            let entry = state.entries.get_mut(&CatalogKey::AllProducts).unwrap();
            entry.fetched_at -= 300_001;
        }

        cache.get_all().await.unwrap();
        assert_eq!(source.all_calls.load(Ordering::SeqCst), 2);
    }
}
