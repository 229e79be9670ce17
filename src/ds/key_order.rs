//! Ordered key set: an `IntrusiveList<K>` plus a `key → NodeId` index.
//!
//! The list owns every node; the index only records where each key's node
//! lives so that promotion and removal do not have to walk the list. Both
//! structures are updated inside the same method, so outside of a call the
//! index and the list always hold the same keys.
//!
//! ```text
//!   index: FxHashMap<K, NodeId>        list: IntrusiveList<K>
//!   ┌─────┬────────┐
//!   │ "a" │ id_0 ──┼──────►  head ─► [a] ◄──► [b] ◄──► [c] ◄── tail
//!   │ "b" │ id_1 ──┼──────────────────┘        │
//!   │ "c" │ id_2 ──┼───────────────────────────┘
//!   └─────┴────────┘
//! ```
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::node_slab::NodeId;
use crate::error::InvariantError;

#[derive(Debug)]
pub struct KeyOrder<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, NodeId>,
}

impl<K> KeyOrder<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Appends a new key at the tail.
    ///
    /// Returns `false` without touching the order if the key is already
    /// tracked.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.list.push_back(key.clone());
        self.index.insert(key, id);
        true
    }

    /// Moves a tracked key to the tail; `false` if the key is unknown.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => {
                let moved = self.list.move_to_back(id);
                debug_assert!(moved, "index points at a node missing from the list");
                moved
            },
            None => false,
        }
    }

    /// Detaches the head node, drops its index entry and returns its key.
    pub fn pop_front(&mut self) -> Option<K> {
        let key = self.list.pop_front()?;
        let dropped = self.index.remove(&key);
        debug_assert!(dropped.is_some(), "list head had no index entry");
        Some(key)
    }

    /// Removes a key from anywhere in the order; `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                let removed = self.list.remove(id);
                debug_assert!(removed.is_some(), "index points at a freed node");
                true
            },
            None => false,
        }
    }

    /// Key that `pop_front` would return next.
    pub fn front(&self) -> Option<&K> {
        self.list.front()
    }

    /// Keys from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    /// Checks the list structure and that every index entry points at a
    /// live node carrying the same key.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "list holds {} nodes but index holds {} keys",
                self.list.len(),
                self.index.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(node_key) if node_key == key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index entry for slot {} names a different key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index entry points at freed slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<K> Default for KeyOrder<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(order: &KeyOrder<&'static str>) -> Vec<&'static str> {
        order.iter().copied().collect()
    }

    #[test]
    fn push_back_tracks_new_keys_only() {
        let mut order = KeyOrder::new();
        assert!(order.push_back("a"));
        assert!(order.push_back("b"));
        assert!(!order.push_back("a"));
        assert_eq!(keys(&order), vec!["a", "b"]);
        assert_eq!(order.len(), 2);
        order.check_invariants().unwrap();
    }

    #[test]
    fn move_to_back_reorders() {
        let mut order = KeyOrder::new();
        order.push_back("a");
        order.push_back("b");
        order.push_back("c");

        assert!(order.move_to_back(&"a"));
        assert_eq!(keys(&order), vec!["b", "c", "a"]);
        assert!(!order.move_to_back(&"zzz"));
        order.check_invariants().unwrap();
    }

    #[test]
    fn pop_front_drops_index_entry() {
        let mut order = KeyOrder::new();
        order.push_back("a");
        order.push_back("b");

        assert_eq!(order.pop_front(), Some("a"));
        assert!(!order.contains(&"a"));
        assert_eq!(order.front(), Some(&"b"));
        assert_eq!(order.pop_front(), Some("b"));
        assert_eq!(order.pop_front(), None);
        assert!(order.is_empty());
        order.check_invariants().unwrap();
    }

    #[test]
    fn remove_from_middle() {
        let mut order = KeyOrder::new();
        order.push_back("a");
        order.push_back("b");
        order.push_back("c");

        assert!(order.remove(&"b"));
        assert!(!order.remove(&"b"));
        assert_eq!(keys(&order), vec!["a", "c"]);
        order.check_invariants().unwrap();

        // Re-inserting a removed key appends it fresh at the tail.
        assert!(order.push_back("b"));
        assert_eq!(keys(&order), vec!["a", "c", "b"]);
        order.check_invariants().unwrap();
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut order = KeyOrder::with_capacity(4);
        order.push_back("a");
        order.push_back("b");
        order.clear();
        assert!(order.is_empty());
        assert_eq!(order.front(), None);
        order.check_invariants().unwrap();
    }
}
