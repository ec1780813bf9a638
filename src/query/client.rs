//! Query Client
//!
//! Session-scoped handle to the query cache. Reads are synchronous: they
//! either return a fresh value or hand back a [`Suspension`] after making
//! sure exactly one fetch for the key is running.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::catalog::{PageRequest, Product, ProductCollection, ProductId, SharedCatalog};
use crate::config::Config;
use crate::error::StorefrontError;
use crate::query::{
    Interrupt, Lookup, QueryKey, QueryOutcome, QueryState, QueryStats, QueryStore, QueryValue,
    Suspension,
};

/// Lower bound on the freshness window of suspending reads.
///
/// A boundary re-renders right after the attempt it waited on settles; with a
/// shorter window that re-render would find the value stale and suspend again.
pub const MIN_SUSPENSE_STALE_TIME: Duration = Duration::from_secs(1);

// == Query Options ==
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// `staleTime`: how long a resolved value suppresses refetching
    pub stale_time: Duration,
    /// `gcTime`: how long an unread settled entry is kept
    pub gc_time: Duration,
    /// Entry capacity before LRU eviction
    pub max_entries: usize,
}

impl QueryOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            stale_time: Duration::from_millis(config.query_stale_time),
            gc_time: Duration::from_millis(config.query_gc_time),
            max_entries: config.query_max_entries,
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(60),
            gc_time: Duration::from_secs(300),
            max_entries: 1000,
        }
    }
}

// == Query Client ==
#[derive(Debug, Clone)]
pub struct QueryClient {
    store: Arc<Mutex<QueryStore>>,
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        let store = QueryStore::new(
            options.max_entries,
            options.stale_time.max(MIN_SUSPENSE_STALE_TIME),
            options.gc_time,
        );
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> MutexGuard<'_, QueryStore> {
        // A panic while holding the lock cannot leave an entry half-updated
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // == Read ==
    /// Returns the value for `key` if fresh; otherwise suspends.
    ///
    /// `fetcher` is invoked only when this read starts a new attempt. The
    /// fetch runs on the tokio runtime and outlives the reader: if the reader
    /// goes away its result still lands in the cache. Must be called from
    /// within a tokio runtime.
    pub fn read<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<QueryValue, Suspension>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryOutcome> + Send + 'static,
    {
        let lookup = self.store().lookup(key, Instant::now());

        match lookup {
            Lookup::Fresh(value) => Ok(value),
            Lookup::InFlight(suspension) => Err(suspension),
            Lookup::Start {
                attempt,
                suspension,
            } => {
                let fetch = fetcher();
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    let outcome = fetch.await;
                    if let Err(error) = &outcome {
                        warn!(%key, attempt, %error, "query attempt rejected");
                    }
                    let applied = store
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .settle(key, attempt, outcome, Instant::now());
                    debug!(%key, attempt, applied, "query attempt settled");
                });
                Err(suspension)
            }
        }
    }

    // == Ensure ==
    /// Async form of [`read`](Self::read): waits for the value instead of
    /// returning the suspension.
    pub async fn ensure<F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryOutcome> + Send + 'static,
    {
        match self.read(key, fetcher) {
            Ok(value) => Ok(value),
            Err(suspension) => suspension.settled().await,
        }
    }

    // == Catalog Queries ==
    /// Reads a single product through the cache.
    pub fn product(
        &self,
        catalog: &SharedCatalog,
        id: ProductId,
    ) -> Result<Arc<Product>, Interrupt> {
        let value = self.read(QueryKey::Product(id), product_fetcher(catalog, id))?;
        expect_product(value).map_err(Interrupt::Fail)
    }

    /// Reads one page of the product collection through the cache.
    pub fn products(
        &self,
        catalog: &SharedCatalog,
        page: PageRequest,
    ) -> Result<Arc<ProductCollection>, Interrupt> {
        let value = self.read(QueryKey::Products(page), collection_fetcher(catalog, page))?;
        expect_collection(value).map_err(Interrupt::Fail)
    }

    /// Waits for a single product, using the cache when fresh.
    pub async fn fetch_product(
        &self,
        catalog: &SharedCatalog,
        id: ProductId,
    ) -> Result<Arc<Product>, StorefrontError> {
        let value = self
            .ensure(QueryKey::Product(id), product_fetcher(catalog, id))
            .await?;
        expect_product(value)
    }

    // == Cache Management ==
    /// Marks a settled entry stale so the next read refetches.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.store().invalidate(key)
    }

    /// Drops entries idle for longer than `gcTime`. Returns how many were removed.
    pub fn collect_garbage(&self) -> usize {
        self.store().collect_garbage(Instant::now())
    }

    pub fn state(&self, key: &QueryKey) -> Option<QueryState> {
        self.store().state(key)
    }

    pub fn stats(&self) -> QueryStats {
        self.store().stats()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

type BoxedFetch = Pin<Box<dyn Future<Output = QueryOutcome> + Send>>;

fn product_fetcher(catalog: &SharedCatalog, id: ProductId) -> impl FnOnce() -> BoxedFetch {
    let catalog = Arc::clone(catalog);
    move || -> BoxedFetch {
        Box::pin(async move {
            catalog
                .get_product(id)
                .await
                .map(|product| QueryValue::Product(Arc::new(product)))
        })
    }
}

fn collection_fetcher(catalog: &SharedCatalog, page: PageRequest) -> impl FnOnce() -> BoxedFetch {
    let catalog = Arc::clone(catalog);
    move || -> BoxedFetch {
        Box::pin(async move {
            catalog
                .get_product_collection(page)
                .await
                .map(|collection| QueryValue::Products(Arc::new(collection)))
        })
    }
}

fn expect_product(value: QueryValue) -> Result<Arc<Product>, StorefrontError> {
    match value {
        QueryValue::Product(product) => Ok(product),
        QueryValue::Products(_) => Err(StorefrontError::Transport(
            "product query resolved to a collection".to_string(),
        )),
    }
}

fn expect_collection(value: QueryValue) -> Result<Arc<ProductCollection>, StorefrontError> {
    match value {
        QueryValue::Products(collection) => Ok(collection),
        QueryValue::Product(_) => Err(StorefrontError::Transport(
            "collection query resolved to a single product".to_string(),
        )),
    }
}
