//! Suspension Module
//!
//! A read that cannot be answered from cache hands back a [`Suspension`]: a
//! registration on the pending attempt that completes when the attempt
//! settles. Nothing blocks; the caller decides when to await it.

use std::fmt;

use tokio::sync::watch;

use crate::error::StorefrontError;
use crate::query::{QueryKey, QueryOutcome};

// == Suspension ==
/// Continuation registered on one in-flight fetch attempt.
#[derive(Debug)]
pub struct Suspension {
    key: QueryKey,
    settled: watch::Receiver<Option<QueryOutcome>>,
}

impl Suspension {
    pub(crate) fn new(key: QueryKey, settled: watch::Receiver<Option<QueryOutcome>>) -> Self {
        Self { key, settled }
    }

    /// Key of the query this suspension waits on.
    pub fn key(&self) -> QueryKey {
        self.key
    }

    /// True once the attempt has settled.
    pub fn is_settled(&self) -> bool {
        self.settled.borrow().is_some()
    }

    // == Settled ==
    /// Waits for the attempt to settle and returns its outcome.
    ///
    /// Every suspension on the same attempt receives the same outcome.
    pub async fn settled(mut self) -> QueryOutcome {
        let outcome = match self.settled.wait_for(Option::is_some).await {
            Ok(settled) => settled.clone(),
            Err(_) => None,
        };

        outcome.unwrap_or_else(|| {
            Err(StorefrontError::Transport(format!(
                "query {} was dropped before it settled",
                self.key
            )))
        })
    }
}

// == Interrupt ==
/// Why rendering a subtree stopped before producing content.
#[derive(Debug)]
pub enum Interrupt {
    /// A read is waiting on an in-flight fetch
    Suspend(Suspension),
    /// A read or the render itself failed
    Fail(StorefrontError),
}

impl From<Suspension> for Interrupt {
    fn from(suspension: Suspension) -> Self {
        Interrupt::Suspend(suspension)
    }
}

impl From<StorefrontError> for Interrupt {
    fn from(error: StorefrontError) -> Self {
        Interrupt::Fail(error)
    }
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupt::Suspend(suspension) => write!(f, "suspended on {}", suspension.key),
            Interrupt::Fail(error) => write!(f, "{}", error),
        }
    }
}
