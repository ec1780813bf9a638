//! Query Store Module
//!
//! Entry table of the query cache: freshness checks, attempt bookkeeping,
//! LRU capacity eviction and idle-entry collection. All methods take the
//! current instant so the policy is independent of the clock.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::query::{
    LruTracker, QueryEntry, QueryKey, QueryOutcome, QueryState, QueryStats, QueryValue, Suspension,
};

// == Lookup ==
/// Result of asking the store for a key.
#[derive(Debug)]
pub enum Lookup {
    /// Fresh value, served synchronously
    Fresh(QueryValue),
    /// An attempt is already in flight; wait on it
    InFlight(Suspension),
    /// The caller must run the fetch for `attempt` and report back via `settle`
    Start { attempt: u64, suspension: Suspension },
}

// == Query Store ==
#[derive(Debug)]
pub struct QueryStore {
    entries: HashMap<QueryKey, QueryEntry>,
    lru: LruTracker<QueryKey>,
    stats: QueryStats,
    max_entries: usize,
    stale_time: Duration,
    gc_time: Duration,
    next_attempt: u64,
}

impl QueryStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_entries` - Capacity before the least recently read settled entry is evicted
    /// * `stale_time` - How long a resolved value is served without refetching
    /// * `gc_time` - How long an unread settled entry is kept
    pub fn new(max_entries: usize, stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: QueryStats::new(),
            max_entries: max_entries.max(1),
            stale_time,
            gc_time,
            next_attempt: 0,
        }
    }

    fn new_attempt(&mut self) -> u64 {
        self.next_attempt += 1;
        self.next_attempt
    }

    // == Lookup ==
    /// Serves `key` from cache or tells the caller how to wait for it.
    ///
    /// At most one attempt per key is ever pending: readers arriving while
    /// one is in flight join it instead of starting another.
    pub fn lookup(&mut self, key: QueryKey, now: Instant) -> Lookup {
        self.lru.touch(&key);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_access = now;

            if let Some(value) = entry.fresh_value(now, self.stale_time) {
                let value = value.clone();
                self.stats.record_hit();
                return Lookup::Fresh(value);
            }

            if entry.is_pending() {
                self.stats.record_dedup();
                return Lookup::InFlight(entry.subscribe(key));
            }
        }

        self.stats.record_miss();
        let attempt = self.new_attempt();

        let suspension = match self.entries.get_mut(&key) {
            Some(entry) => {
                // Stale or rejected: a fresh attempt reuses the slot
                entry.begin_attempt(attempt);
                let suspension = entry.subscribe(key);
                self.make_room(&key, 0);
                suspension
            }
            None => {
                self.make_room(&key, 1);
                let entry = QueryEntry::pending(attempt, now);
                let suspension = entry.subscribe(key);
                self.entries.insert(key, entry);
                self.stats.set_total_entries(self.entries.len());
                suspension
            }
        };

        debug!(%key, attempt, "query attempt started");
        Lookup::Start { attempt, suspension }
    }

    /// Evicts settled entries until `slots` more fit under capacity.
    fn make_room(&mut self, incoming: &QueryKey, slots: usize) {
        while self.entries.len() + slots > self.max_entries {
            let entries = &self.entries;
            let victim = self.lru.evict_oldest_matching(|k| {
                k != incoming && entries.get(k).is_some_and(|e| !e.is_pending())
            });

            match victim {
                Some(key) => {
                    self.entries.remove(&key);
                    self.stats.record_evictions(1);
                    debug!(%key, "query evicted for capacity");
                }
                // Everything left is in flight; let the table grow past capacity
                None => break,
            }
        }
    }

    // == Settle ==
    /// Records the outcome of `attempt` for `key`.
    ///
    /// Returns false when the outcome was discarded because the entry is gone
    /// or already owned by a newer attempt.
    pub fn settle(
        &mut self,
        key: QueryKey,
        attempt: u64,
        outcome: QueryOutcome,
        now: Instant,
    ) -> bool {
        let ok = outcome.is_ok();
        let applied = self
            .entries
            .get_mut(&key)
            .is_some_and(|entry| entry.settle(attempt, outcome, now));

        if applied {
            self.stats.record_fetch(ok);
        }
        applied
    }

    // == Invalidate ==
    /// Marks a settled entry stale so the next read refetches it.
    ///
    /// Returns false if the key is unknown or still pending.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_pending() => {
                entry.invalidated = true;
                true
            }
            _ => false,
        }
    }

    // == Collect Garbage ==
    /// Drops settled entries nobody has read for `gc_time`.
    ///
    /// Returns the number of entries removed.
    pub fn collect_garbage(&mut self, now: Instant) -> usize {
        let gc_time = self.gc_time;
        let idle: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_idle(now, gc_time))
            .map(|(key, _)| *key)
            .collect();

        for key in &idle {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_evictions(idle.len());
        self.stats.set_total_entries(self.entries.len());
        idle.len()
    }

    pub fn state(&self, key: &QueryKey) -> Option<QueryState> {
        self.entries.get(key).map(QueryEntry::state)
    }

    pub fn stats(&self) -> QueryStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    pub fn gc_time(&self) -> Duration {
        self.gc_time
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
