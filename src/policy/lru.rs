//! # Least Recently Used (LRU) ordering
//!
//! Keeps keys in recency order: every access moves the key's node to the
//! tail, so the head is always the key that has gone longest without being
//! touched.
//!
//! ```text
//!   access(A), access(B), access(C):
//!     head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!             victim               MRU
//!
//!   access(A)  (hit: detach + re-attach, node reused)
//!     head ─► [B] ◄──► [C] ◄──► [A] ◄── tail
//!
//!   evict_key() → B
//!     head ─► [C] ◄──► [A] ◄── tail
//! ```
//!
//! | Operation    | Time | Notes                                   |
//! |--------------|------|-----------------------------------------|
//! | `access_key` | O(1) | index lookup + splice                   |
//! | `evict_key`  | O(1) | pop head + index removal                |
//! | `remove_key` | O(1) | index removal + unlink                  |
use std::hash::Hash;

use crate::builder::PolicyKind;
use crate::ds::KeyOrder;
use crate::error::InvariantError;
use crate::traits::EvictionPolicyCore;

/// Recency-ordered key tracker.
#[derive(Debug)]
pub struct LruPolicy<K> {
    order: KeyOrder<K>,
}

impl<K> LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            order: KeyOrder::new(),
        }
    }

    /// Pre-sizes the list and the index for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: KeyOrder::with_capacity(capacity),
        }
    }

    /// Key that the next eviction would pick.
    pub fn peek_victim(&self) -> Option<&K> {
        self.order.front()
    }

    /// Keys from least to most recently used.
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

impl<K> Default for LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicyCore<K> for LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn access_key(&mut self, key: K) {
        if !self.order.move_to_back(&key) {
            self.order.push_back(key);
        }
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
        PolicyKind::Lru
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(policy: &LruPolicy<u32>) -> Vec<u32> {
        policy.iter().copied().collect()
    }

    #[test]
    fn first_access_appends_at_tail() {
        let mut policy = LruPolicy::new();
        policy.access_key(1);
        policy.access_key(2);
        policy.access_key(3);
        assert_eq!(order(&policy), vec![1, 2, 3]);
        assert_eq!(policy.len(), 3);
        policy.check_invariants().unwrap();
    }

    #[test]
    fn repeat_access_promotes_to_tail() {
        let mut policy = LruPolicy::new();
        policy.access_key(1);
        policy.access_key(2);
        policy.access_key(3);
        policy.access_key(1);
        assert_eq!(order(&policy), vec![2, 3, 1]);
        assert_eq!(policy.peek_victim(), Some(&2));
        policy.check_invariants().unwrap();
    }

    #[test]
    fn double_access_is_same_as_single() {
        let mut once = LruPolicy::new();
        let mut twice = LruPolicy::new();
        for key in [1, 2, 3] {
            once.access_key(key);
            twice.access_key(key);
        }
        once.access_key(2);
        twice.access_key(2);
        twice.access_key(2);
        assert_eq!(order(&once), order(&twice));
    }

    #[test]
    fn evict_returns_least_recent_and_forgets_it() {
        let mut policy = LruPolicy::new();
        policy.access_key(1);
        policy.access_key(2);
        policy.access_key(1);

        assert_eq!(policy.evict_key(), Some(2));
        assert!(!policy.contains(&2));
        assert_eq!(policy.evict_key(), Some(1));
        assert_eq!(policy.evict_key(), None);
        assert!(policy.is_empty());
        policy.check_invariants().unwrap();
    }

    #[test]
    fn evicted_key_comes_back_as_new() {
        let mut policy = LruPolicy::new();
        policy.access_key(1);
        policy.access_key(2);
        policy.evict_key();
        policy.access_key(1);
        assert_eq!(order(&policy), vec![2, 1]);
        policy.check_invariants().unwrap();
    }

    #[test]
    fn remove_key_from_middle() {
        let mut policy = LruPolicy::new();
        for key in [1, 2, 3] {
            policy.access_key(key);
        }
        assert!(policy.remove_key(&2));
        assert!(!policy.remove_key(&2));
        assert_eq!(order(&policy), vec![1, 3]);
        policy.check_invariants().unwrap();
    }

    #[test]
    fn kind_and_clear() {
        let mut policy = LruPolicy::with_capacity(8);
        policy.access_key(1);
        assert_eq!(policy.kind(), PolicyKind::Lru);
        policy.clear();
        assert!(policy.is_empty());
        assert_eq!(policy.evict_key(), None);
    }
}
