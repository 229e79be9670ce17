//! Intrusive doubly linked list over a [`NodeSlab`](crate::ds::node_slab).
//!
//! Nodes are linked by [`NodeId`] instead of pointers, which gives stable
//! handles and O(1) splices.
//!
//! ## Architecture
//!
//! ```text
//!   slab (NodeSlab<T>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ NodeId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! A node is in the list exactly when its slot is occupied. Links are only
//! cleared between a `detach` and the matching re-attach or release, both
//! inside a single method call.
//!
//! ## Operations
//! - `push_back(value)`: alloc + attach at tail
//! - `move_to_back(id)`: detach + attach at tail
//! - `pop_front()`: detach head + release
//! - `remove(id)`: detach + release
//!
//! All four are O(1); `iter` is O(n).
use crate::ds::node_slab::{NodeId, NodeSlab};
use crate::error::InvariantError;

/// Doubly linked list whose nodes live in a [`NodeSlab`].
#[derive(Debug)]
pub struct IntrusiveList<T> {
    slab: NodeSlab<T>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slab: NodeSlab::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slab.live()
    }

    pub fn is_empty(&self) -> bool {
        self.slab.live() == 0
    }

    /// Value at the head, the next one `pop_front` returns.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Values from head to tail.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slab.node(id).map(|node| &node.value)
    }

    /// Appends a new node at the tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let id = self.slab.alloc(value);
        let attached = self.attach_back(id);
        debug_assert!(attached.is_some());
        id
    }

    /// Removes and returns the head value, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Unlinks node `id`, releases its slot and returns its value.
    ///
    /// Returns `None` if `id` is not a node of this list.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.detach(id)?;
        self.slab.release(id).map(|node| node.value)
    }

    /// Moves an existing node to the tail; `false` if `id` is not present.
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        if self.tail == Some(id) {
            return true;
        }
        self.detach(id).is_some() && self.attach_back(id).is_some()
    }

    pub fn clear(&mut self) {
        self.slab.clear();
        self.head = None;
        self.tail = None;
    }

    /// Unlinks `id` from its neighbours and fixes up head/tail.
    ///
    /// The node stays allocated; the caller either re-attaches it or
    /// releases the slot before returning.
    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.slab.node_mut(id)?;
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(prev_id) => self.slab.node_mut(prev_id)?.next = next,
            None => self.head = next,
        }

        match next {
            Some(next_id) => self.slab.node_mut(next_id)?.prev = prev,
            None => self.tail = prev,
        }

        Some(())
    }

    fn attach_back(&mut self, id: NodeId) -> Option<()> {
        let old_tail = self.tail;
        {
            let node = self.slab.node_mut(id)?;
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(old_tail) => self.slab.node_mut(old_tail)?.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        Some(())
    }

    /// Checks the slab bookkeeping, then walks head to tail checking link
    /// symmetry, the head/tail ends, absence of cycles and that every live
    /// node is reachable.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.slab.check_invariants()?;

        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("exactly one of head/tail is set"));
            }
            if self.slab.live() != 0 {
                return Err(InvariantError::new(format!(
                    "list has no head but {} live nodes",
                    self.slab.live()
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            let node = self
                .slab
                .node(id)
                .ok_or_else(|| InvariantError::new(format!("link to freed slot {}", id.index())))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a back link that does not match its predecessor",
                    id.index()
                )));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("last reachable node is not the tail"));
            }

            count += 1;
            if count > self.slab.live() {
                return Err(InvariantError::new("cycle detected in list"));
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.slab.live() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable but {} live",
                count,
                self.slab.live()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("intrusive list invariant violated: {err}");
        }
    }
}

pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.slab.node(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_back_keeps_insertion_order() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.len(), 3);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_back_from_head_middle_and_tail() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        list.push_back("b");
        let c = list.push_back("c");

        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec!["b", "c", "a"]);
        list.debug_validate_invariants();

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!["b", "a", "c"]);
        list.debug_validate_invariants();

        // Already the tail: no-op.
        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!["b", "a", "c"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_back_single_element() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec![1]);
        list.debug_validate_invariants();
    }

    #[test]
    fn moving_a_removed_node_fails() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.push_back(2);
        assert_eq!(list.remove(a), Some(1));

        assert!(!list.move_to_back(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.get(a), None);
        assert_eq!(values(&list), vec![2]);
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["a", "c"]);

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.front(), Some(&"c"));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_front_drains_in_order() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        list.push_back(2);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn freed_slots_are_reused_by_push() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.pop_front();
        let c = list.push_back(3);
        assert_eq!(a.index(), c.index());
        assert_eq!(values(&list), vec![2, 3]);
        list.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_state() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.pop_front(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn slab_bookkeeping_breach_fails_list_check() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.remove(a);
        list.check_invariants().unwrap();

        // Live but never linked: unreachable from head.
        list.slab.alloc(3);
        let err = list.check_invariants().unwrap_err();
        assert!(err.message().contains("reachable"), "{err}");
    }
}
