//! Query Module
//!
//! Suspending query cache over the catalog: keyed entries with freshness
//! (`staleTime`) and idle collection (`gcTime`), one in-flight fetch per key,
//! and suspensions that every waiter of an attempt resolves through.

mod client;
mod entry;
mod key;
mod lru;
mod stats;
mod store;
mod suspense;


pub use client::{QueryClient, QueryOptions, MIN_SUSPENSE_STALE_TIME};
pub use entry::{QueryEntry, QueryState, QueryStatus};
pub use key::{QueryKey, QueryOutcome, QueryValue};
pub use lru::LruTracker;
pub use stats::QueryStats;
pub use store::{Lookup, QueryStore};
pub use suspense::{Interrupt, Suspension};
