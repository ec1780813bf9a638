//! Query Statistics Module
//!
//! Counters for reads, fetches and evictions of the query cache.

use serde::Serialize;

// == Query Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryStats {
    /// Reads served from a fresh entry
    pub hits: u64,
    /// Reads that started a fetch attempt
    pub misses: u64,
    /// Reads that joined an attempt already in flight
    pub deduplicated: u64,
    /// Attempts that resolved
    pub fetches: u64,
    /// Attempts that rejected
    pub failures: u64,
    /// Entries dropped for capacity or idleness
    pub evictions: u64,
    /// Current number of entries
    pub total_entries: usize,
}

impl QueryStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of reads that did not need a new fetch.
    ///
    /// Returns 0.0 if nothing has been read yet.
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.deduplicated;
        let total = served + self.misses;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_dedup(&mut self) {
        self.deduplicated += 1;
    }

    pub fn record_fetch(&mut self, ok: bool) {
        if ok {
            self.fetches += 1;
        } else {
            self.failures += 1;
        }
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_no_reads() {
        assert_eq!(QueryStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_counts_dedup_as_served() {
        let mut stats = QueryStats::new();
        stats.record_miss();
        stats.record_dedup();
        stats.record_hit();
        stats.record_hit();

        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_fetch_outcomes() {
        let mut stats = QueryStats::new();
        stats.record_fetch(true);
        stats.record_fetch(false);
        stats.record_fetch(false);

        assert_eq!(stats.fetches, 1);
        assert_eq!(stats.failures, 2);
    }

    #[test]
    fn test_record_evictions() {
        let mut stats = QueryStats::new();
        stats.record_evictions(3);
        stats.record_evictions(0);
        assert_eq!(stats.evictions, 3);
    }
}
