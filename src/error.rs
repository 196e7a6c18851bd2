//! Error types for the memoizing cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the memoizing cache.
///
/// Failures raised by a wrapped computation are not represented here:
/// [`try_get_or_compute`](crate::MemoCache::try_get_or_compute) propagates
/// the closure's own error type unchanged, so a compute failure reaches the
/// caller exactly as an uncached call would raise it.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A supplied argument value cannot serve as part of a cache key
    /// (no stable equality, or the key exceeds the part limit)
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    /// An invalid capacity was requested
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
}

// == Result Type Alias ==
/// Convenience Result type for the memoizing cache.
pub type Result<T> = std::result::Result<T, CacheError>;
