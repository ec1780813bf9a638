//! LRU Tracker Module
//!
//! Read-recency ordering of query keys for capacity eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks read order of query keys.
///
/// - Front = most recently read
/// - Back = least recently read
#[derive(Debug)]
pub struct LruTracker<K> {
    order: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }
}

impl<K: PartialEq + Clone> LruTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently read.
    pub fn touch(&mut self, key: &K) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest Matching ==
    /// Removes and returns the least recently read key accepted by `evictable`.
    ///
    /// Keys rejected by the predicate keep their position.
    pub fn evict_oldest_matching(&mut self, evictable: impl Fn(&K) -> bool) -> Option<K> {
        let index = self.order.iter().rposition(|k| evictable(k))?;
        self.order.remove(index)
    }

    /// Least recently read key, if any.
    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
