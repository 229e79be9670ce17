pub use crate::builder::{CacheConfig, CacheFactory, DEFAULT_CAPACITY, PolicyKind};
pub use crate::cache::Cache;
#[cfg(feature = "concurrency")]
pub use crate::cache::ConcurrentCache;
pub use crate::error::{CacheError, InvariantError};
pub use crate::policy::{EvictionPolicy, FifoPolicy, LruPolicy};
pub use crate::store::{HashMapStore, StoreCore, StoreMetrics, StoreMut};
pub use crate::traits::{CoreCache, EvictionPolicyCore};
