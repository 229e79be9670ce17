//! # First In, First Out (FIFO) ordering
//!
//! Keeps keys in insertion order. A key's node is created the first time
//! the key is seen and never moves afterwards, so repeated accesses cannot
//! rescue an old entry from eviction.
//!
//! ```text
//!   access(A), access(B), access(C):
//!     head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!             oldest             newest
//!
//!   access(A)  (known key: no-op)
//!     head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!   evict_key() → A
//! ```
//!
//! Compared to [`LruPolicy`](super::LruPolicy) the only difference is
//! `access_key` on a known key. Eviction mechanics are identical.
use std::hash::Hash;

use crate::builder::PolicyKind;
use crate::ds::KeyOrder;
use crate::error::InvariantError;
use crate::traits::EvictionPolicyCore;

/// Insertion-ordered key tracker.
#[derive(Debug)]
pub struct FifoPolicy<K> {
    order: KeyOrder<K>,
}

impl<K> FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            order: KeyOrder::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: KeyOrder::with_capacity(capacity),
        }
    }

    /// Oldest tracked key.
    pub fn peek_victim(&self) -> Option<&K> {
        self.order.front()
    }

    /// Keys from oldest to newest insertion.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()
    }

    pub(crate) fn key_order(&self) -> &KeyOrder<K> {
        &self.order
    }
}

impl<K> Default for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicyCore<K> for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn access_key(&mut self, key: K) {
        // Known keys keep their original position.
        self.order.push_back(key);
    }

    #[inline]
    fn evict_key(&mut self) -> Option<K> {
        self.order.pop_front()
    }

    fn remove_key(&mut self, key: &K) -> bool {
        self.order.remove(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }
}
