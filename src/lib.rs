//! recencache: a fixed-capacity LRU cache with O(1) `get`/`put`.
//!
//! The cache pairs a hash index with an arena-backed recency list. The arena
//! owns every entry and the index stores generational slot handles, so there
//! is no shared ownership between the two and no dangling link survives an
//! eviction.
//!
//! ```
//! use recencache::prelude::*;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, 1);
//! cache.put(2, 2);
//! assert_eq!(cache.get(&1), Some(&1));
//! cache.put(3, 3); // evicts key 2
//! assert_eq!(cache.try_get(&2), Err(KeyNotFound));
//! ```
//!
//! ## Features
//!
//! - `concurrency` (default): [`ConcurrentLruCache`](policy::lru::ConcurrentLruCache),
//!   a `parking_lot::RwLock` wrapper.
//! - `metrics`: per-operation counters and a Prometheus text exporter.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
