//! Cache Module
//!
//! Provides memoization of pure computations with LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::MemoEntry;
pub use key::{ArgValue, CacheKey, FloatBits};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::MemoCache;

// == Public Constants ==
/// Maximum number of argument values a cache key may carry
pub const MAX_KEY_PARTS: usize = 64;
