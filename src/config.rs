//! Configuration Module
//!
//! Handles cache capacity configuration and loading defaults from
//! environment variables.

use std::env;
use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{CacheError, Result};

// == Capacity ==
/// Maximum number of entries a cache may hold.
///
/// The "no limit" configuration is an explicit variant rather than an
/// absent parameter, so an unbounded cache is always the result of a
/// deliberate choice at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Never evict; the cache grows without bound
    Unbounded,
    /// Evict the least recently used entry once this many entries exist
    Bounded(NonZeroUsize),
}

impl Capacity {
    // == Bounded Constructor ==
    /// Creates a bounded capacity of `n` entries.
    ///
    /// Returns `CacheError::InvalidCapacity` for `n == 0`; a cache that can
    /// hold nothing is a configuration mistake, and "unbounded" must be
    /// requested explicitly via [`Capacity::Unbounded`].
    pub fn bounded(n: usize) -> Result<Self> {
        NonZeroUsize::new(n).map(Capacity::Bounded).ok_or_else(|| {
            CacheError::InvalidCapacity("Bounded capacity must be at least 1".to_string())
        })
    }

    // == From Limit ==
    /// Maps a raw numeric limit to a capacity, with `0` meaning unbounded.
    ///
    /// This is the encoding used by environment configuration, where a
    /// single integer must express both cases.
    pub fn from_limit(n: usize) -> Self {
        match NonZeroUsize::new(n) {
            Some(n) => Capacity::Bounded(n),
            None => Capacity::Unbounded,
        }
    }

    // == Limit ==
    /// Returns the entry limit, or None if unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Unbounded => None,
            Capacity::Bounded(n) => Some(n.get()),
        }
    }

    // == Is Bounded ==
    /// Returns true if this capacity enforces a limit.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Capacity::Bounded(_))
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Unbounded => write!(f, "unbounded"),
            Capacity::Bounded(n) => write!(f, "{}", n),
        }
    }
}

// == Memo Config ==
/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct MemoConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: Capacity,
}

impl MemoConfig {
    /// Creates a new MemoConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMO_CACHE_CAPACITY` - Maximum cache entries (default: 1024,
    ///   `0` = unbounded)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("MEMO_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Capacity::from_limit)
                .unwrap_or_else(|| Capacity::from_limit(DEFAULT_CAPACITY)),
        }
    }
}

/// Default entry limit when nothing is configured.
const DEFAULT_CAPACITY: usize = 1024;

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::from_limit(DEFAULT_CAPACITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounded_valid() {
        let cap = Capacity::bounded(10).unwrap();
        assert_eq!(cap.limit(), Some(10));
        assert!(cap.is_bounded());
    }

    #[test]
    fn test_capacity_bounded_zero_rejected() {
        let result = Capacity::bounded(0);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(_))));
    }

    #[test]
    fn test_capacity_from_limit_zero_means_unbounded() {
        assert_eq!(Capacity::from_limit(0), Capacity::Unbounded);
        assert_eq!(Capacity::from_limit(5).limit(), Some(5));
    }

    #[test]
    fn test_capacity_unbounded_has_no_limit() {
        assert_eq!(Capacity::Unbounded.limit(), None);
        assert!(!Capacity::Unbounded.is_bounded());
    }

    #[test]
    fn test_capacity_display() {
        assert_eq!(Capacity::Unbounded.to_string(), "unbounded");
        assert_eq!(Capacity::bounded(42).unwrap().to_string(), "42");
    }

    #[test]
    fn test_config_default() {
        let config = MemoConfig::default();
        assert_eq!(config.capacity.limit(), Some(1024));
    }

    // Single test for the env path: parallel tests sharing the variable
    // would race each other
    #[test]
    fn test_config_from_env() {
        env::remove_var("MEMO_CACHE_CAPACITY");
        let config = MemoConfig::from_env();
        assert_eq!(config.capacity.limit(), Some(1024));

        env::set_var("MEMO_CACHE_CAPACITY", "0");
        let config = MemoConfig::from_env();
        assert_eq!(config.capacity, Capacity::Unbounded);

        env::set_var("MEMO_CACHE_CAPACITY", "77");
        let config = MemoConfig::from_env();
        assert_eq!(config.capacity.limit(), Some(77));

        env::remove_var("MEMO_CACHE_CAPACITY");
    }
}
