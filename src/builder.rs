//! Cache factory and configuration.
//!
//! Turns a capacity and a [`PolicyKind`] into a ready [`Cache`] with its own
//! freshly built eviction policy. Validation happens here, once, so the
//! cache itself never has to deal with a zero capacity.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheFactory, PolicyKind};
//!
//! let mut cache = CacheFactory::new(100)
//!     .get_cache::<u64, String>(PolicyKind::Lru)
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Ok(&"hello".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::Cache;
use crate::error::CacheError;

/// Capacity used by [`CacheConfig::default`].
pub const DEFAULT_CAPACITY: usize = 5;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PolicyKind {
    /// Least Recently Used eviction.
    #[default]
    Lru,
    /// First In, First Out eviction.
    Fifo,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "lru",
            PolicyKind::Fifo => "fifo",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    /// Parses `"lru"` or `"fifo"`, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("lru") {
            Ok(PolicyKind::Lru)
        } else if name.eq_ignore_ascii_case("fifo") {
            Ok(PolicyKind::Fifo)
        } else {
            Err(CacheError::invalid_config(format!(
                "unknown eviction policy `{name}` (expected `lru` or `fifo`)"
            )))
        }
    }
}

/// Everything needed to build a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CacheConfig {
    /// Maximum number of entries; must be positive.
    pub capacity: usize,
    /// Eviction policy.
    pub policy: PolicyKind,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: PolicyKind::default(),
        }
    }
}

impl CacheConfig {
    pub fn new(capacity: usize, policy: PolicyKind) -> Self {
        Self { capacity, policy }
    }

    /// Rejects configurations a cache cannot be built from.
    pub fn validate(&self) -> Result<(), CacheError> {
        if self.capacity == 0 {
            return Err(CacheError::invalid_config("capacity must be > 0"));
        }
        Ok(())
    }

    /// Validates and builds a cache.
    pub fn build<K, V>(&self) -> Result<Cache<K, V>, CacheError>
    where
        K: Clone + Eq + Hash,
    {
        self.validate()?;
        debug!(capacity = self.capacity, policy = %self.policy, "building cache");
        Ok(Cache::new(self.capacity, self.policy))
    }
}

/// Builds caches of a fixed capacity.
///
/// Every call to [`get_cache`](Self::get_cache) returns an independent cache
/// with its own policy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheFactory {
    capacity: usize,
}

impl CacheFactory {
    /// Create a new factory for caches of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// Fails with [`CacheError::InvalidConfiguration`] if the factory was
    /// created with a zero capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheFactory, PolicyKind};
    ///
    /// let factory = CacheFactory::new(3);
    /// let lru = factory.get_cache::<u64, String>(PolicyKind::Lru).unwrap();
    /// let fifo = factory.get_cache::<u64, String>(PolicyKind::Fifo).unwrap();
    /// assert_eq!(lru.capacity(), 3);
    /// assert_eq!(fifo.policy_kind(), PolicyKind::Fifo);
    /// ```
    pub fn get_cache<K, V>(&self, policy: PolicyKind) -> Result<Cache<K, V>, CacheError>
    where
        K: Clone + Eq + Hash,
    {
        CacheConfig::new(self.capacity, policy).build()
    }

    /// Build a cache from a policy name such as `"lru"` or `"FIFO"`.
    pub fn get_cache_by_name<K, V>(&self, policy: &str) -> Result<Cache<K, V>, CacheError>
    where
        K: Clone + Eq + Hash,
    {
        self.get_cache(policy.parse()?)
    }
}

impl Default for CacheFactory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
