//! Memocache - A bounded memoizing cache with LRU eviction
//!
//! Stores the results of pure, deterministic computations keyed by their
//! argument tuple, bounded by a maximum number of entries, evicting the
//! least recently used entry when the bound is exceeded.
//!
//! # Example
//! ```
//! use memocache::{CacheKey, MemoCache};
//!
//! let mut cache = MemoCache::with_capacity(128).unwrap();
//! let key = CacheKey::from_parts(vec![6u64.into(), 7u64.into()]).unwrap();
//!
//! let product = cache.get_or_compute(key.clone(), || 6u64 * 7);
//! assert_eq!(product, 42);
//!
//! // Second call is a hit; the closure is not invoked
//! let cached = cache.get_or_compute(key, || unreachable!());
//! assert_eq!(cached, 42);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod sync;

pub use cache::{ArgValue, CacheKey, CacheStats, MemoCache};
pub use config::{Capacity, MemoConfig};
pub use error::{CacheError, Result};
pub use sync::SharedMemoCache;
