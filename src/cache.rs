//! # Bounded cache
//!
//! [`Cache`] glues a capacity-bounded [`HashMapStore`] to an
//! [`EvictionPolicy`]. The store owns values, the policy owns ordering, and
//! the cache keeps their key sets equal.
//!
//! ## Operations Flow
//!
//! ```text
//!   get(k)
//!   ═══════════════════════════════════════════════════════════════════
//!     store.get(k) ──miss──► Err(KeyNotFound)      (nothing else touched)
//!          │
//!         hit
//!          ▼
//!     policy.access_key(k) ──► Ok(&v)
//!
//!   put(k, v)
//!   ═══════════════════════════════════════════════════════════════════
//!     k new && store full? ──yes──► victim = policy.evict_key()
//!          │                        store.remove(victim)
//!          ▼                              │
//!     store.add(k, v) ◄───────────────────┘
//!          │
//!          ▼
//!     policy.access_key(k)   (LRU: promote, FIFO: first sight only)
//! ```
//!
//! Overwriting an existing key never evicts: the entry count does not
//! change. It still counts as an access, so under LRU it promotes the key.
//!
//! ## Thread Safety
//!
//! - [`Cache`]: single-threaded; `get` takes `&mut self` because LRU
//!   reorders on every hit.
//! - [`ConcurrentCache`] (feature `concurrency`): the whole cache behind one
//!   `parking_lot::Mutex`, held for the full duration of each call.
use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::builder::PolicyKind;
use crate::error::{CacheError, InvariantError};
use crate::policy::EvictionPolicy;
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMetrics, StoreMut};
use crate::traits::{CoreCache, EvictionPolicyCore};

/// Capacity-bounded key-value cache with a pluggable eviction policy.
///
/// Built through [`CacheFactory`](crate::builder::CacheFactory) or
/// [`CacheConfig`](crate::builder::CacheConfig).
///
/// # Example
///
/// ```
/// use evictkit::builder::{CacheFactory, PolicyKind};
/// use evictkit::error::CacheError;
///
/// let mut cache = CacheFactory::new(2).get_cache(PolicyKind::Lru).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a").unwrap();   // "a" is now most recently used
/// cache.put("c", 3);          // evicts "b"
///
/// assert_eq!(cache.get(&"b"), Err(CacheError::KeyNotFound));
/// assert_eq!(cache.get(&"a"), Ok(&1));
/// ```
pub struct Cache<K, V> {
    store: HashMapStore<K, V>,
    policy: EvictionPolicy<K>,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Callers are expected to have rejected `capacity == 0` already.
    pub(crate) fn new(capacity: usize, kind: PolicyKind) -> Self {
        debug_assert!(capacity > 0, "cache built with zero capacity");
        Self {
            store: HashMapStore::new(capacity),
            policy: EvictionPolicy::new(kind, capacity),
        }
    }

    /// Looks up `key` and records the access with the eviction policy.
    ///
    /// A miss returns [`CacheError::KeyNotFound`] and leaves the entries and
    /// their order untouched. The only state a miss changes is the `misses`
    /// counter reported by [`metrics`](Self::metrics).
    pub fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        let value = self.store.get(key)?;
        self.policy.access_key(key.clone());
        Ok(value)
    }

    /// Looks up `key` without recording an access or touching counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.peek(key)
    }

    /// Inserts or overwrites an entry, evicting one victim first if the key
    /// is new and the cache is full.
    ///
    /// Returns the previous value when `key` was already present.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if !self.store.contains(&key) && self.store.is_full() {
            self.evict_one();
        }

        let previous = self.store.add(key.clone(), value);
        if previous.is_some() {
            trace!(policy = %self.policy.kind(), "overwrote existing entry");
        }
        self.policy.access_key(key);

        debug_assert!(self.store.len() <= self.store.capacity());
        debug_assert_eq!(self.store.len(), self.policy.len());
        previous
    }

    /// Removes `key` from both the store and the eviction order.
    pub fn remove(&mut self, key: &K) -> Result<V, CacheError> {
        let value = self.store.remove(key)?;
        let tracked = self.policy.remove_key(key);
        debug_assert!(tracked, "store held a key the policy did not track");
        Ok(value)
    }

    /// Drops the policy's victim from the store and returns the entry.
    ///
    /// Only called when the store is full, so the policy tracks at least one
    /// key. Running out of keys here means the store and the policy have
    /// diverged, which is a bug rather than a recoverable condition.
    fn evict_one(&mut self) -> (K, V) {
        let victim = self.policy.evict_key().unwrap_or_else(|| {
            panic!(
                "eviction underflow: {} policy is empty while the store holds {} entries",
                self.policy.kind(),
                self.store.len()
            )
        });
        let value = match self.store.remove(&victim) {
            Ok(value) => value,
            Err(_) => panic!(
                "{} policy evicted a key the store does not hold",
                self.policy.kind()
            ),
        };
        self.store.record_eviction();
        debug!(
            policy = %self.policy.kind(),
            len = self.store.len(),
            capacity = self.store.capacity(),
            "evicted entry"
        );
        (victim, value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Keys ordered from the next victim to the most protected entry.
    pub fn keys_in_eviction_order(&self) -> impl Iterator<Item = &K> {
        self.policy.iter()
    }

    /// Key that the next eviction would remove.
    pub fn peek_victim(&self) -> Option<&K> {
        self.policy.peek_victim()
    }

    /// Removes all entries. Capacity and policy kind are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.policy.clear();
    }

    /// Store-level hit/miss/insert/eviction counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.store.metrics()
    }

    /// Checks the list structure, the policy index and that the store and
    /// the policy hold exactly the same keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.policy.check_invariants()?;
        if self.store.len() > self.store.capacity() {
            return Err(InvariantError::new(format!(
                "store holds {} entries over capacity {}",
                self.store.len(),
                self.store.capacity()
            )));
        }
        if self.store.len() != self.policy.len() {
            return Err(InvariantError::new(format!(
                "store holds {} keys but policy tracks {}",
                self.store.len(),
                self.policy.len()
            )));
        }
        if self.store.keys().any(|key| !self.policy.contains(key)) {
            return Err(InvariantError::new("store key missing from policy order"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("cache invariant violated: {err}");
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy.kind())
            .field("len", &self.store.len())
            .field("capacity", &self.store.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key).ok()
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self);
    }
}

impl<K, V> Extend<(K, V)> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Thread-safe cache: one [`Cache`] behind a single `parking_lot::Mutex`.
///
/// Every call holds the lock for its whole duration, including `get`,
/// which reorders under LRU. Values are returned by clone.
///
/// # Example
///
/// ```
/// use evictkit::builder::{CacheFactory, PolicyKind};
/// use evictkit::cache::ConcurrentCache;
///
/// let cache = ConcurrentCache::new(
///     CacheFactory::new(10).get_cache::<u32, String>(PolicyKind::Lru).unwrap(),
/// );
/// let shared = cache.clone();
/// std::thread::spawn(move || {
///     shared.put(1, "one".to_string());
/// })
/// .join()
/// .unwrap();
/// assert_eq!(cache.get(&1), Ok("one".to_string()));
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentCache<K, V> {
    inner: Arc<Mutex<Cache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentCache")
            .field("policy", &cache.policy_kind())
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> From<Cache<K, V>> for ConcurrentCache<K, V> {
    fn from(cache: Cache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new(cache: Cache<K, V>) -> Self {
        Self::from(cache)
    }

    /// Looks up `key`, records the access and returns a clone of the value.
    pub fn get(&self, key: &K) -> Result<V, CacheError> {
        let mut cache = self.inner.lock();
        cache.get(key).cloned()
    }

    pub fn peek(&self, key: &K) -> Option<V> {
        let cache = self.inner.lock();
        cache.peek(key).cloned()
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        let mut cache = self.inner.lock();
        cache.put(key, value)
    }

    pub fn remove(&self, key: &K) -> Result<V, CacheError> {
        let mut cache = self.inner.lock();
        cache.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.inner.lock().policy_kind()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn metrics(&self) -> StoreMetrics {
        self.inner.lock().metrics()
    }

    /// Runs `f` with exclusive access to the underlying cache, for
    /// multi-step operations that must not interleave with other callers.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut Cache<K, V>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u8, u16),
        Get(u8),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..16, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            2 => (0u8..16).prop_map(Op::Get),
            1 => (0u8..16).prop_map(Op::Remove),
        ]
    }

    fn kind() -> impl Strategy<Value = PolicyKind> {
        prop_oneof![Just(PolicyKind::Lru), Just(PolicyKind::Fifo)]
    }

    /// Reference model: a vector ordered from next victim to newest.
    #[derive(Default)]
    struct Model {
        entries: Vec<(u8, u16)>,
    }

    impl Model {
        fn position(&self, key: u8) -> Option<usize> {
            self.entries.iter().position(|(k, _)| *k == key)
        }

        fn touch(&mut self, idx: usize, kind: PolicyKind) {
            if kind == PolicyKind::Lru {
                let entry = self.entries.remove(idx);
                self.entries.push(entry);
            }
        }

        fn apply(&mut self, op: &Op, capacity: usize, kind: PolicyKind) {
            match *op {
                Op::Put(key, value) => match self.position(key) {
                    Some(idx) => {
                        self.entries[idx].1 = value;
                        self.touch(idx, kind);
                    },
                    None => {
                        if self.entries.len() == capacity {
                            self.entries.remove(0);
                        }
                        self.entries.push((key, value));
                    },
                },
                Op::Get(key) => {
                    if let Some(idx) = self.position(key) {
                        self.touch(idx, kind);
                    }
                },
                Op::Remove(key) => {
                    if let Some(idx) = self.position(key) {
                        self.entries.remove(idx);
                    }
                },
            }
        }
    }

    proptest! {
        /// Cache matches the reference model after every operation.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 1usize..8,
            kind in kind(),
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut cache: Cache<u8, u16> = Cache::new(capacity, kind);
            let mut model = Model::default();

            for op in &ops {
                match *op {
                    Op::Put(key, value) => {
                        let expected = model.position(key).map(|idx| model.entries[idx].1);
                        prop_assert_eq!(cache.put(key, value), expected);
                    },
                    Op::Get(key) => {
                        let expected = model.position(key).map(|idx| model.entries[idx].1);
                        prop_assert_eq!(cache.get(&key).ok().copied(), expected);
                    },
                    Op::Remove(key) => {
                        let expected = model.position(key).map(|idx| model.entries[idx].1);
                        prop_assert_eq!(cache.remove(&key).ok(), expected);
                    },
                }
                model.apply(op, capacity, kind);

                let keys: Vec<u8> = cache.keys_in_eviction_order().copied().collect();
                let expected: Vec<u8> = model.entries.iter().map(|(k, _)| *k).collect();
                prop_assert_eq!(keys, expected);
                prop_assert!(cache.check_invariants().is_ok());
            }
        }

        /// len() never exceeds capacity.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_len_within_capacity(
            capacity in 1usize..50,
            kind in kind(),
            keys in prop::collection::vec(0u32..200, 0..300)
        ) {
            let mut cache: Cache<u32, u32> = Cache::new(capacity, kind);
            for key in keys {
                cache.put(key, key);
                prop_assert!(cache.len() <= cache.capacity());
            }
        }

        /// A miss never changes entries, order or length.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_miss_is_side_effect_free(
            capacity in 1usize..20,
            kind in kind(),
            keys in prop::collection::vec(0u32..50, 0..60),
            probe in 50u32..100
        ) {
            let mut cache: Cache<u32, u32> = Cache::new(capacity, kind);
            for key in keys {
                cache.put(key, key);
            }
            let before: Vec<u32> = cache.keys_in_eviction_order().copied().collect();

            prop_assert_eq!(cache.get(&probe), Err(CacheError::KeyNotFound));

            let after: Vec<u32> = cache.keys_in_eviction_order().copied().collect();
            prop_assert_eq!(before, after);
        }
    }
}
