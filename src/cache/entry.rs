//! Cache Entry Module
//!
//! Defines the structure for individual memoized entries.

use std::time::{Duration, Instant};

// == Memo Entry ==
/// A single memoized result with access metadata.
///
/// The entry's position in the recency order is tracked by the
/// [`LruTracker`](crate::cache::LruTracker), not here.
#[derive(Debug, Clone)]
pub struct MemoEntry<V> {
    /// The computed result
    pub value: V,
    /// When the value was computed and inserted
    created_at: Instant,
    /// Number of times this entry has been returned from cache
    hits: u64,
}

impl<V> MemoEntry<V> {
    // == Constructor ==
    /// Creates a new entry around a freshly computed value.
    pub fn new(value: V) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            hits: 0,
        }
    }

    // == Record Hit ==
    /// Marks the entry as returned from cache once more.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Hits ==
    /// Returns how many times this entry has been served from cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    // == Age ==
    /// Returns how long ago the value was computed.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
