//! Shared Cache Module
//!
//! Wraps a cache in `Arc<Mutex<_>>` so independent call sites can share
//! one instance. All mutations (hit promotion, miss insertion, eviction)
//! are serialized under the mutex, preserving the size and recency
//! invariants.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheKey, CacheStats, MemoCache};
use crate::config::Capacity;
use crate::error::Result;

// == Shared Memo Cache ==
/// A clonable, thread-safe handle to a [`MemoCache`].
///
/// The lock is NOT held while a computation runs. On a miss the sequence
/// is: lock, record the miss, unlock, run `compute`, lock again, insert.
/// This means a computation may recurse into the same cache through its
/// own handle without deadlocking, which is what memoizing a recursive
/// function requires. The trade-off is that two callers racing on the
/// same absent key may both run the computation; the second insertion
/// overwrites the first with an equal value (the computation is pure), so
/// no invariant is violated.
#[derive(Debug)]
pub struct SharedMemoCache<V> {
    inner: Arc<Mutex<MemoCache<V>>>,
}

impl<V> Clone for SharedMemoCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedMemoCache<V> {
    // == Constructor ==
    /// Creates a new shared cache with the given capacity.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoCache::new(capacity))),
        }
    }

    /// Creates a shared cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    /// Creates a shared cache bounded to `max_entries`.
    ///
    /// Fails with `CacheError::InvalidCapacity` for a zero bound.
    pub fn with_capacity(max_entries: usize) -> Result<Self> {
        Ok(Self::new(Capacity::bounded(max_entries)?))
    }

    // == Lock ==
    /// Acquires the cache, recovering from poisoning.
    ///
    /// The cache holds plain maps that a panicking caller cannot leave
    /// logically torn between operations, so the poisoned state is safe to
    /// reuse.
    fn lock(&self) -> MutexGuard<'_, MemoCache<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get Or Compute ==
    /// Returns the cached result for `key`, computing and storing it on a
    /// miss. See [`MemoCache::get_or_compute`] for the contract.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.lock().lookup(&key) {
            return value;
        }
        // Lock released here so compute may re-enter recursively
        let value = compute();
        self.lock().admit(key, value.clone());
        value
    }

    // == Try Get Or Compute ==
    /// Fallible variant; an `Err` from `compute` propagates unchanged and
    /// nothing is stored. See [`MemoCache::try_get_or_compute`].
    pub fn try_get_or_compute<F, E>(&self, key: CacheKey, compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.lock().lookup(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.lock().admit(key, value.clone());
        Ok(value)
    }

    // == Clear ==
    /// Empties all entries, recency state and statistics.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // == Configure ==
    /// Changes the entry limit, evicting down to the new bound if needed.
    pub fn configure(&self, capacity: Capacity) {
        self.lock().configure(capacity);
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // == Contains ==
    /// Checks for a key without touching recency or statistics.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock().contains(key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    use crate::cache::ArgValue;

    fn key(n: u64) -> CacheKey {
        CacheKey::from_parts(vec![ArgValue::Uint(n)]).unwrap()
    }

    #[test]
    fn test_shared_hit_and_miss() {
        let cache = SharedMemoCache::with_capacity(10).unwrap();

        let first = cache.get_or_compute(key(1), || 11u64);
        let second = cache.get_or_compute(key(1), || unreachable!());

        assert_eq!(first, 11);
        assert_eq!(second, 11);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_shared_recursive_compute() {
        let cache = SharedMemoCache::with_capacity(64).unwrap();

        // A computation that re-enters the cache must not deadlock
        fn sum_to(cache: &SharedMemoCache<u64>, n: u64) -> u64 {
            cache.get_or_compute(key(n), || {
                if n == 0 {
                    0
                } else {
                    n + sum_to(cache, n - 1)
                }
            })
        }

        assert_eq!(sum_to(&cache, 10), 55);
        // One miss per distinct argument, then pure hits
        assert_eq!(cache.stats().misses, 11);
        assert_eq!(sum_to(&cache, 10), 55);
        assert_eq!(cache.stats().misses, 11);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = SharedMemoCache::unbounded();
        let computes = Arc::new(AtomicU64::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                let computes = Arc::clone(&computes);
                thread::spawn(move || {
                    for n in 0..100u64 {
                        let value = cache.get_or_compute(key(n), || {
                            computes.fetch_add(1, Ordering::Relaxed);
                            n * 2
                        });
                        assert_eq!(value, n * 2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 100);
        // Racing threads may duplicate a computation, but never corrupt
        // the stored results or exceed one entry per key
        assert!(computes.load(Ordering::Relaxed) >= 100);
    }

    #[test]
    fn test_shared_failed_compute_not_cached() {
        let cache: SharedMemoCache<u64> = SharedMemoCache::with_capacity(10).unwrap();

        let result: std::result::Result<u64, &str> =
            cache.try_get_or_compute(key(1), || Err("boom"));
        assert!(result.is_err());
        assert!(cache.is_empty());

        let result: std::result::Result<u64, &str> =
            cache.try_get_or_compute(key(1), || Ok(5));
        assert_eq!(result.unwrap(), 5);
    }

    #[test]
    fn test_shared_clear_and_configure() {
        let cache = SharedMemoCache::with_capacity(10).unwrap();

        for n in 0..5 {
            cache.get_or_compute(key(n), || n);
        }
        assert_eq!(cache.len(), 5);

        cache.configure(Capacity::bounded(2).unwrap());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().size, 0);
    }
}
