pub use crate::builder::{CacheConfig, LruCacheBuilder};
pub use crate::error::{ConfigError, InvariantError, KeyNotFound};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, PrometheusTextExporter};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
