//! Eviction policies.
//!
//! [`EvictionPolicy`] is the closed set of strategies a
//! [`Cache`](crate::cache::Cache) can be built with. Each variant owns its
//! own list and index; nothing is shared between caches.

pub mod fifo;
pub mod lru;

use std::hash::Hash;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use crate::builder::PolicyKind;
use crate::ds::KeyOrder;
use crate::error::InvariantError;
use crate::traits::EvictionPolicyCore;

/// Tagged union over the supported eviction strategies.
#[derive(Debug)]
pub enum EvictionPolicy<K> {
    Lru(LruPolicy<K>),
    Fifo(FifoPolicy<K>),
}

impl<K> EvictionPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Builds an empty policy of the given kind, sized for `capacity` keys.
    pub fn new(kind: PolicyKind, capacity: usize) -> Self {
        match kind {
            PolicyKind::Lru => EvictionPolicy::Lru(LruPolicy::with_capacity(capacity)),
            PolicyKind::Fifo => EvictionPolicy::Fifo(FifoPolicy::with_capacity(capacity)),
        }
    }

    /// Key that the next `evict_key` would return.
    pub fn peek_victim(&self) -> Option<&K> {
        self.key_order().front()
    }

    /// Tracked keys from next victim to most protected.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.key_order().iter()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.key_order().check_invariants()
    }

    fn key_order(&self) -> &KeyOrder<K> {
        match self {
            EvictionPolicy::Lru(lru) => lru.key_order(),
            EvictionPolicy::Fifo(fifo) => fifo.key_order(),
        }
    }
}

impl<K> EvictionPolicyCore<K> for EvictionPolicy<K>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn access_key(&mut self, key: K) {
        match self {
            EvictionPolicy::Lru(lru) => lru.access_key(key),
            EvictionPolicy::Fifo(fifo) => fifo.access_key(key),
        }
    }

    #[inline]
    fn evict_key(&mut self) -> Option<K> {
        match self {
            EvictionPolicy::Lru(lru) => lru.evict_key(),
            EvictionPolicy::Fifo(fifo) => fifo.evict_key(),
        }
    }

    fn remove_key(&mut self, key: &K) -> bool {
        match self {
            EvictionPolicy::Lru(lru) => lru.remove_key(key),
            EvictionPolicy::Fifo(fifo) => fifo.remove_key(key),
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.key_order().contains(key)
    }

    fn len(&self) -> usize {
        self.key_order().len()
    }

    fn clear(&mut self) {
        match self {
            EvictionPolicy::Lru(lru) => lru.clear(),
            EvictionPolicy::Fifo(fifo) => fifo.clear(),
        }
    }

    fn kind(&self) -> PolicyKind {
        match self {
            EvictionPolicy::Lru(_) => PolicyKind::Lru,
            EvictionPolicy::Fifo(_) => PolicyKind::Fifo,
        }
    }
}
