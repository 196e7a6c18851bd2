//! Memo Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, wrapped
//! around caller-supplied deferred computations.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cache::{CacheKey, CacheStats, LruTracker, MemoEntry};
use crate::config::Capacity;
use crate::error::Result;

// == Memo Cache ==
/// Bounded memoizing cache with LRU eviction.
///
/// Stores the results of a pure computation keyed by its argument tuple.
/// A hit returns the stored result without invoking the computation and
/// promotes the key to most recently used; a miss runs the computation,
/// stores the result, and evicts the least recently used entry if a finite
/// capacity is exceeded.
///
/// Values are returned by clone on a hit, so `V` is expected to be cheap
/// to clone (counts, small strings, `Arc`-wrapped data). Use [`peek`] to
/// borrow a stored value without promoting it.
///
/// Correctness rests on the computation being deterministic in its key:
/// every argument that affects the result must appear in the key, and the
/// computation must be pure. Side effects of the computation run exactly
/// once per miss, never on hits.
///
/// [`peek`]: MemoCache::peek
#[derive(Debug)]
pub struct MemoCache<V> {
    /// Key-result storage
    entries: HashMap<CacheKey, MemoEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Entry limit
    capacity: Capacity,
}

impl<V: Clone> MemoCache<V> {
    // == Constructor ==
    /// Creates a new MemoCache with the given capacity.
    pub fn new(capacity: Capacity) -> Self {
        let stats = CacheStats {
            capacity: capacity.limit(),
            ..CacheStats::new()
        };
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats,
            capacity,
        }
    }

    /// Creates a cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    /// Creates a cache bounded to `max_entries`.
    ///
    /// Fails with `CacheError::InvalidCapacity` for a zero bound.
    pub fn with_capacity(max_entries: usize) -> Result<Self> {
        Ok(Self::new(Capacity::bounded(max_entries)?))
    }

    // == Get Or Compute ==
    /// Returns the cached result for `key`, computing and storing it on a
    /// miss.
    ///
    /// On a hit the stored result is returned and `compute` is not invoked.
    /// On a miss `compute` runs synchronously, its result is stored as the
    /// most recently used entry, and if the cache now exceeds a finite
    /// capacity the least recently used entry is evicted (exactly one
    /// eviction, since size can overflow by at most one).
    pub fn get_or_compute<F>(&mut self, key: CacheKey, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.lookup(&key) {
            return value;
        }
        let value = compute();
        self.admit(key, value.clone());
        value
    }

    // == Try Get Or Compute ==
    /// Fallible variant of [`get_or_compute`](MemoCache::get_or_compute).
    ///
    /// An `Err` from `compute` propagates unchanged and nothing is stored:
    /// failed computations are never memoized, and a later call with the
    /// same key invokes `compute` again. The failed attempt still counts
    /// as a miss; entries and recency state are untouched.
    pub fn try_get_or_compute<F, E>(&mut self, key: CacheKey, compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.admit(key, value.clone());
        Ok(value)
    }

    // == Lookup ==
    /// Hit path: returns the stored result and promotes the key, or
    /// records a miss and returns None.
    pub(crate) fn lookup(&mut self, key: &CacheKey) -> Option<V> {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.record_hit();
            let value = entry.value.clone();
            self.stats.record_hit();
            self.lru.touch(key);
            trace!(%key, "cache hit");
            Some(value)
        } else {
            self.stats.record_miss();
            trace!(%key, "cache miss");
            None
        }
    }

    // == Admit ==
    /// Miss path: stores a freshly computed result as most recently used
    /// and evicts if the capacity is exceeded.
    ///
    /// The miss itself is counted by [`lookup`](MemoCache::lookup);
    /// callers must have gone through it first.
    pub(crate) fn admit(&mut self, key: CacheKey, value: V) {
        self.entries.insert(key.clone(), MemoEntry::new(value));
        self.lru.touch(&key);

        if let Some(max) = self.capacity.limit() {
            if self.entries.len() > max {
                self.evict_one();
            }
        }

        self.stats.set_size(self.entries.len());
    }

    // == Evict One ==
    /// Removes the current least recently used entry.
    fn evict_one(&mut self) {
        if let Some(oldest) = self.lru.evict_oldest() {
            self.entries.remove(&oldest);
            self.stats.record_eviction();
            debug!(key = %oldest, "evicted least recently used entry");
        }
    }

    // == Clear ==
    /// Empties all entries, recency state and statistics.
    ///
    /// Subsequent calls behave as a cold cache. The configured capacity is
    /// retained.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.reset();
        debug!("cache cleared");
    }

    // == Configure ==
    /// Changes the entry limit.
    ///
    /// If the new capacity is smaller than the current size, least
    /// recently used entries are evicted until the size fits.
    /// `Capacity::Unbounded` disables eviction entirely.
    pub fn configure(&mut self, capacity: Capacity) {
        self.capacity = capacity;
        self.stats.capacity = capacity.limit();

        if let Some(max) = self.capacity.limit() {
            while self.entries.len() > max {
                self.evict_one();
            }
        }

        self.stats.set_size(self.entries.len());
        debug!(%capacity, size = self.entries.len(), "capacity configured");
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Capacity ==
    /// Returns the configured capacity.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    // == Contains ==
    /// Checks for a key without touching recency or statistics.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    // == Peek ==
    /// Borrows a stored result without promoting the key or counting a
    /// hit.
    pub fn peek(&self, key: &CacheKey) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
