//! HashMap-backed store.
//!
//! ## Architecture
//! - Entries live in an `FxHashMap<K, V>` for O(1) lookup.
//! - Capacity is enforced by entry count, not byte size.
//! - Counters are atomics so that `get(&self)` can record hits and misses.
//!
//! ## Core Operations
//! - `get`: fetch by key, `KeyNotFound` on miss (updates hit/miss metrics).
//! - `add`: insert or overwrite by key.
//! - `remove`: delete by key, `KeyNotFound` if absent.
//! - `is_full`: entry count equals capacity.
//!
//! ## Example Usage
//! ```rust
//! use evictkit::store::hashmap::HashMapStore;
//! use evictkit::store::traits::{StoreCore, StoreMut};
//!
//! let mut store: HashMapStore<u64, String> = HashMapStore::new(2);
//! store.add(1, "a".to_string());
//! assert!(store.contains(&1));
//! assert!(!store.is_full());
//! ```
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::error::CacheError;
use crate::store::traits::{StoreCore, StoreMetrics, StoreMut};

/// Store metrics counters.
#[derive(Debug, Default)]
struct StoreCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    evictions: AtomicU64,
}

impl StoreCounters {
    fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Single-threaded, capacity-bounded map from key to value.
#[derive(Debug)]
pub struct HashMapStore<K, V> {
    map: FxHashMap<K, V>,
    capacity: usize,
    metrics: StoreCounters,
}

impl<K, V> HashMapStore<K, V>
where
    K: Eq + Hash,
{
    /// Create a store with a fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            metrics: StoreCounters::default(),
        }
    }

    /// Fetch a value by key without touching the hit/miss counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Iterate over stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }
}

impl<K, V> StoreCore<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn get(&self, key: &K) -> Result<&V, CacheError> {
        match self.map.get(key) {
            Some(value) => {
                StoreCounters::bump(&self.metrics.hits);
                Ok(value)
            },
            None => {
                StoreCounters::bump(&self.metrics.misses);
                Err(CacheError::KeyNotFound)
            },
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn metrics(&self) -> StoreMetrics {
        self.metrics.snapshot()
    }

    fn record_eviction(&self) {
        StoreCounters::bump(&self.metrics.evictions);
    }
}

impl<K, V> StoreMut<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn add(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.map.insert(key, value);
        if previous.is_some() {
            StoreCounters::bump(&self.metrics.updates);
        } else {
            StoreCounters::bump(&self.metrics.inserts);
        }
        previous
    }

    fn remove(&mut self, key: &K) -> Result<V, CacheError> {
        let removed = self.map.remove(key).ok_or(CacheError::KeyNotFound)?;
        StoreCounters::bump(&self.metrics.removes);
        Ok(removed)
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
