//! Node storage for [`IntrusiveList`](crate::ds::IntrusiveList).
//!
//! Every list node lives in one `Vec` slot and is addressed by a [`NodeId`].
//! Freed slots are pushed on a free list and handed back by the next
//! `alloc`, so the backing `Vec` only grows while every slot is occupied.
//!
//! ```text
//!   slots: [ Some(n0) | None | Some(n2) | None ]      free: [3, 1]
//!                       ▲                  ▲
//!                       └──── recycled ────┘  (last freed, first reused)
//!
//!   live == slots.len() - free.len()
//! ```
//!
//! The slab does not know about ordering: `prev`/`next` are plain fields the
//! list rewires. A `NodeId` is an index, so holders must drop it once the
//! node is freed.
use crate::error::InvariantError;

/// Handle to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A list node: the tracked value plus its neighbour links.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

#[derive(Debug)]
pub(crate) struct NodeSlab<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> NodeSlab<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Stores an unlinked node for `value`.
    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_none(), "free list names a live node");
                self.slots[idx] = Some(node);
                idx
            },
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            },
        };
        self.live += 1;
        NodeId(idx)
    }

    /// Vacates the slot and hands back the node; `None` if already vacant.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.live -= 1;
        Some(node)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0)?.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    pub(crate) fn live(&self) -> usize {
        self.live
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Checks that the live count, the occupied slots and the free list
    /// agree, and that no free entry is stale or repeated.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.live + self.free.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "{} live + {} free does not cover {} slots",
                self.live,
                self.free.len(),
                self.slots.len()
            )));
        }

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.live {
            return Err(InvariantError::new(format!(
                "{occupied} occupied slots but live count is {}",
                self.live
            )));
        }

        let mut seen = vec![false; self.slots.len()];
        for &idx in &self.free {
            match self.slots.get(idx) {
                None => {
                    return Err(InvariantError::new(format!("free slot {idx} out of range")));
                },
                Some(Some(_)) => {
                    return Err(InvariantError::new(format!("free slot {idx} is occupied")));
                },
                Some(None) if seen[idx] => {
                    return Err(InvariantError::new(format!("free slot {idx} listed twice")));
                },
                Some(None) => seen[idx] = true,
            }
        }
        Ok(())
    }
}
