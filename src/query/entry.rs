//! Query Entry Module
//!
//! One cached query: its current status, the attempt counter and the
//! settlement channel for the attempt in flight.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::StorefrontError;
use crate::query::{QueryKey, QueryOutcome, QueryValue, Suspension};

// == Query Status ==
#[derive(Debug, Clone)]
pub enum QueryStatus {
    Pending,
    Resolved(QueryValue),
    Rejected(StorefrontError),
}

/// Status without payload, for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Pending,
    Resolved,
    Rejected,
}

// == Query Entry ==
#[derive(Debug)]
pub struct QueryEntry {
    pub status: QueryStatus,
    /// Attempt currently owning the entry
    pub attempt: u64,
    /// When the current attempt settled
    pub settled_at: Option<Instant>,
    /// Last time any reader asked for this key
    pub last_access: Instant,
    /// Set by invalidation; forces the next read to refetch
    pub invalidated: bool,
    settled: watch::Sender<Option<QueryOutcome>>,
}

impl QueryEntry {
    // == Constructor ==
    /// Creates a pending entry owned by `attempt`.
    pub fn pending(attempt: u64, now: Instant) -> Self {
        let (settled, _) = watch::channel(None);
        Self {
            status: QueryStatus::Pending,
            attempt,
            settled_at: None,
            last_access: now,
            invalidated: false,
            settled,
        }
    }

    pub fn state(&self) -> QueryState {
        match self.status {
            QueryStatus::Pending => QueryState::Pending,
            QueryStatus::Resolved(_) => QueryState::Resolved,
            QueryStatus::Rejected(_) => QueryState::Rejected,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, QueryStatus::Pending)
    }

    // == Freshness ==
    /// A resolved, non-invalidated entry younger than `stale_time`.
    ///
    /// Boundary: at exactly `stale_time` the entry is stale.
    pub fn fresh_value(&self, now: Instant, stale_time: Duration) -> Option<&QueryValue> {
        match (&self.status, self.settled_at) {
            (QueryStatus::Resolved(value), Some(at))
                if !self.invalidated && now.saturating_duration_since(at) < stale_time =>
            {
                Some(value)
            }
            _ => None,
        }
    }

    /// Settled and unread for at least `gc_time`. Pending entries are never idle.
    pub fn is_idle(&self, now: Instant, gc_time: Duration) -> bool {
        !self.is_pending() && now.saturating_duration_since(self.last_access) >= gc_time
    }

    /// Registers a new waiter on the attempt in flight.
    pub fn subscribe(&self, key: QueryKey) -> Suspension {
        Suspension::new(key, self.settled.subscribe())
    }

    // == Begin Attempt ==
    /// Moves the entry back to pending under a new attempt, reusing the slot.
    ///
    /// The settlement channel is replaced so waiters of the previous attempt
    /// keep the outcome they were given.
    pub fn begin_attempt(&mut self, attempt: u64) {
        let (settled, _) = watch::channel(None);
        self.settled = settled;
        self.status = QueryStatus::Pending;
        self.attempt = attempt;
        self.settled_at = None;
        self.invalidated = false;
    }

    // == Settle ==
    /// Applies the outcome of `attempt` and wakes its waiters.
    ///
    /// Returns false if the entry has moved on to another attempt or has
    /// already settled; the outcome is then discarded.
    pub fn settle(&mut self, attempt: u64, outcome: QueryOutcome, now: Instant) -> bool {
        if attempt != self.attempt || !self.is_pending() {
            return false;
        }

        self.status = match &outcome {
            Ok(value) => QueryStatus::Resolved(value.clone()),
            Err(error) => QueryStatus::Rejected(error.clone()),
        };
        self.settled_at = Some(now);
        self.settled.send_replace(Some(outcome));
        true
    }
}
