//! Cache Key Module
//!
//! Defines the argument-tuple key identifying a memoized result.

use std::fmt;

use serde::Serialize;

use crate::cache::MAX_KEY_PARTS;
use crate::error::{CacheError, Result};

// == Float Bits ==
/// A finite float usable as part of a cache key.
///
/// Floats have no stable equality in general (NaN != NaN), so raw `f64`
/// values cannot key a map. This wrapper admits only non-NaN values and
/// compares them by bit pattern, which is total and consistent with IEEE
/// equality for every admitted value. Note that `0.0` and `-0.0` have
/// distinct bit patterns and therefore form distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FloatBits(u64);

impl FloatBits {
    // == Constructor ==
    /// Wraps a float for use in a cache key.
    ///
    /// Returns `CacheError::UnsupportedKey` for NaN, which has no stable
    /// equality and would make a cached result unreachable.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(CacheError::UnsupportedKey(
                "NaN has no stable equality and cannot be used in a key".to_string(),
            ));
        }
        Ok(Self(value.to_bits()))
    }

    // == Value ==
    /// Returns the wrapped float.
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

// == Arg Value ==
/// One positional argument value of a memoized computation.
///
/// Two values are equal iff they are the same variant holding equal
/// contents; `Int(1)` and `Uint(1)` are distinct key parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ArgValue {
    /// Signed integer argument
    Int(i64),
    /// Unsigned integer argument
    Uint(u64),
    /// Boolean argument
    Bool(bool),
    /// String argument
    Str(String),
    /// Raw byte argument
    Bytes(Vec<u8>),
    /// Finite float argument (see [`FloatBits`])
    Float(FloatBits),
}

impl ArgValue {
    /// Wraps a float argument, rejecting NaN.
    pub fn float(value: f64) -> Result<Self> {
        FloatBits::new(value).map(ArgValue::Float)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v.into())
    }
}

impl From<u64> for ArgValue {
    fn from(v: u64) -> Self {
        ArgValue::Uint(v)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        ArgValue::Uint(v.into())
    }
}

impl From<usize> for ArgValue {
    fn from(v: usize) -> Self {
        ArgValue::Uint(v as u64)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}

impl From<char> for ArgValue {
    fn from(v: char) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<&[u8]> for ArgValue {
    fn from(v: &[u8]) -> Self {
        ArgValue::Bytes(v.to_vec())
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(v) => write!(f, "{}", v),
            ArgValue::Uint(v) => write!(f, "{}", v),
            ArgValue::Bool(v) => write!(f, "{}", v),
            ArgValue::Str(v) => write!(f, "{:?}", v),
            ArgValue::Bytes(v) => write!(f, "{} bytes", v.len()),
            ArgValue::Float(v) => write!(f, "{}", v.value()),
        }
    }
}

// == Cache Key ==
/// The ordered tuple of argument values identifying a cached result.
///
/// Equality is positional: two keys are equal iff they hold equal values
/// in the same order. Every argument that affects the computation's result
/// must appear in the key; omitting one silently conflates distinct
/// computations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey {
    /// Positional argument values, in call order
    parts: Vec<ArgValue>,
}

impl CacheKey {
    // == Constructor ==
    /// Builds a key from positional argument values.
    ///
    /// An empty key is valid (a zero-argument computation has exactly one
    /// result). Returns `CacheError::UnsupportedKey` if the key carries
    /// more than `MAX_KEY_PARTS` values.
    pub fn from_parts(parts: Vec<ArgValue>) -> Result<Self> {
        if parts.len() > MAX_KEY_PARTS {
            return Err(CacheError::UnsupportedKey(format!(
                "Key exceeds maximum of {} parts",
                MAX_KEY_PARTS
            )));
        }
        Ok(Self { parts })
    }

    // == Parts ==
    /// Returns the argument values in call order.
    pub fn parts(&self) -> &[ArgValue] {
        &self.parts
    }

    // == Length ==
    /// Returns the number of argument values in the key.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    // == Is Empty ==
    /// Returns true for the zero-argument key.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, ")")
    }
}
