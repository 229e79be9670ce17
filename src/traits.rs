//! # Cache Trait Hierarchy
//!
//! Two small seams separate *what the caller sees* from *who decides the
//! next victim*:
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │   caller-facing
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └────────────────────┬────────────────────┘
//!                        │ implemented by Cache<K, V>
//!                        ▼
//!   ┌─────────────────────────────────────────┐
//!   │        EvictionPolicyCore<K>            │   ordering only
//!   │                                         │
//!   │  access_key(&mut, K)                    │
//!   │  evict_key(&mut) → Option<K>            │
//!   │  remove_key(&mut, &K) → bool            │
//!   │  contains / len / clear / kind          │
//!   └────────────────────┬────────────────────┘
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!    LruPolicy<K>                FifoPolicy<K>
//!    (promote on access)         (first sight only)
//! ```
//!
//! Policies never see values. The store never sees ordering. The cache is
//! the only place that talks to both.
//!
//! ## Thread Safety
//!
//! Nothing here is thread-safe on its own: even `get` mutates ordering
//! under LRU. Share a cache through
//! [`ConcurrentCache`](crate::cache::ConcurrentCache) (feature
//! `concurrency`), which serializes every call behind one lock.

use crate::builder::PolicyKind;

/// Core cache operations.
///
/// # Example
///
/// ```
/// use evictkit::builder::{CacheFactory, PolicyKind};
/// use evictkit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = CacheFactory::new(100)
///     .get_cache::<u64, String>(PolicyKind::Lru)
///     .unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and the key is new, one entry is evicted
    /// first according to the cache's eviction policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction order depending on the policy. Use
    /// [`contains`](Self::contains) to test membership without doing so.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Ordering bookkeeping for one eviction strategy.
///
/// A policy tracks keys only. It is told about every access and, when the
/// store is full, names the key to sacrifice.
///
/// # Example
///
/// ```
/// use evictkit::policy::LruPolicy;
/// use evictkit::traits::EvictionPolicyCore;
///
/// let mut policy = LruPolicy::new();
/// policy.access_key("a");
/// policy.access_key("b");
/// policy.access_key("a");
/// assert_eq!(policy.evict_key(), Some("b"));
/// ```
pub trait EvictionPolicyCore<K> {
    /// Records an access to `key`, creating its node on first sight.
    fn access_key(&mut self, key: K);

    /// Removes the next victim from the order and returns its key.
    ///
    /// Returns `None` only when no key is tracked.
    fn evict_key(&mut self) -> Option<K>;

    /// Forgets `key` wherever it sits; `false` if it was not tracked.
    fn remove_key(&mut self, key: &K) -> bool;

    /// Returns `true` if the policy currently tracks `key`.
    fn contains(&self, key: &K) -> bool;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every key.
    fn clear(&mut self);

    /// Which strategy this is.
    fn kind(&self) -> PolicyKind;
}
