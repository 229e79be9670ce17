//! evictkit: a bounded key-value cache with pluggable eviction.
//!
//! A [`Cache`](cache::Cache) holds at most `capacity` entries. When a new
//! key arrives at a full cache, its eviction policy picks exactly one victim:
//!
//! - **LRU**: the key used least recently; every hit and every overwrite
//!   counts as a use.
//! - **FIFO**: the key inserted earliest; hits and overwrites do not change
//!   the order.
//!
//! Both policies are built on the same O(1) machinery: list nodes kept in a
//! slab and linked by [`NodeId`] ([`IntrusiveList`]) plus an `FxHashMap` from
//! key to node handle ([`KeyOrder`](ds::KeyOrder)).
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = CacheFactory::new(2).get_cache(PolicyKind::Fifo).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1).unwrap();     // FIFO ignores reads
//! cache.put(3, "three");      // evicts 1
//!
//! assert_eq!(cache.get(&1), Err(CacheError::KeyNotFound));
//! ```
//!
//! Enable the `concurrency` feature for [`ConcurrentCache`](cache::ConcurrentCache)
//! and `serde` to load a [`CacheConfig`](builder::CacheConfig) from a file.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;

pub use crate::ds::{IntrusiveList, NodeId};
