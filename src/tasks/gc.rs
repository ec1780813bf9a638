//! Query GC Task
//!
//! Background task that periodically drops idle query cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::query::QueryClient;

/// Spawns a background task that sweeps the query cache every
/// `interval_secs` seconds.
///
/// Entries still pending are never collected. The returned handle is
/// aborted during graceful shutdown.
pub fn spawn_gc_task(queries: QueryClient, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!("Starting query GC task with interval of {} seconds", interval.as_secs());

        loop {
            tokio::time::sleep(interval).await;

            let removed = queries.collect_garbage();
            if removed > 0 {
                info!("Query GC: removed {} idle entries", removed);
            } else {
                debug!("Query GC: no idle entries found");
            }
        }
    })
}
