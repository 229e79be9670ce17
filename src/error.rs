//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by cache lookups, explicit removals and the
//!   factory when a key is missing or the configuration is rejected.
//! - [`InvariantError`]: Returned by `check_invariants` methods when the
//!   list, the key index or the store disagree with each other.
//!
//! Eviction from an empty policy has no error value. It can only happen if
//! the store and the policy index have drifted apart, so it panics.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::builder::{CacheFactory, PolicyKind};
//! use evictkit::error::CacheError;
//!
//! let err = CacheFactory::new(0)
//!     .get_cache::<u64, String>(PolicyKind::Lru)
//!     .unwrap_err();
//! assert!(matches!(err, CacheError::InvalidConfiguration(_)));
//!
//! let mut cache = CacheFactory::new(2)
//!     .get_cache::<u64, String>(PolicyKind::Fifo)
//!     .unwrap();
//! assert_eq!(cache.get(&7), Err(CacheError::KeyNotFound));
//! ```

use std::fmt;

use thiserror::Error;

/// Errors surfaced to callers of the cache and the factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The key is not present.
    #[error("key not found")]
    KeyNotFound,

    /// Zero capacity or an unrecognized policy name.
    #[error("invalid cache configuration: {0}")]
    InvalidConfiguration(String),
}

impl CacheError {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        CacheError::InvalidConfiguration(msg.into())
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on [`IntrusiveList`](crate::ds::IntrusiveList),
/// [`KeyOrder`](crate::ds::KeyOrder) and [`Cache`](crate::cache::Cache).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
