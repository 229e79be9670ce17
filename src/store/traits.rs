//! Storage backends for the cache.
//!
//! Stores own keys and values and enforce the entry-count bound. They know
//! nothing about eviction order: the policy decides *which* key goes, the
//! store only refuses to grow past `capacity` and reports when it is full.

use crate::error::CacheError;

/// Snapshot of store-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub evictions: u64,
}

impl StoreMetrics {
    /// Fraction of lookups that hit, or `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Read-side store operations.
pub trait StoreCore<K, V> {
    /// Fetches a value, counting a hit or a miss.
    fn get(&self, key: &K) -> Result<&V, CacheError>;

    /// Checks whether a key exists.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, fixed at construction.
    fn capacity(&self) -> usize;

    /// `true` iff the entry count has reached capacity.
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Snapshot the store's counters.
    fn metrics(&self) -> StoreMetrics;

    /// Record that an entry left because the policy chose it as a victim.
    fn record_eviction(&self);
}

/// Mutating store operations.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Inserts or overwrites an entry and returns the previous value.
    ///
    /// Does not check capacity: making room is the caller's job.
    fn add(&mut self, key: K, value: V) -> Option<V>;

    /// Deletes an entry; `KeyNotFound` if it is absent.
    fn remove(&mut self, key: &K) -> Result<V, CacheError>;

    /// Remove all entries.
    fn clear(&mut self);
}
