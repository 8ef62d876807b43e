//! Cache configuration and builder.
//!
//! [`CacheConfig`] is the single place capacity and allocation strategy are
//! validated; both [`LruCache::with_config`] and [`LruCacheBuilder`] go
//! through it.
//!
//! ## Example
//!
//! ```rust
//! use recencache::builder::LruCacheBuilder;
//!
//! let mut cache = LruCacheBuilder::new(100).build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(LruCacheBuilder::new(0).try_build::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::LruCache;

/// Most entries reserved up front when `prealloc` is set. Larger caches
/// reserve this much and grow on demand.
pub const MAX_PREALLOC: usize = 1 << 16;

/// Construction parameters for an LRU cache.
///
/// | Field      | Type    | Default | Description                              |
/// |------------|---------|---------|------------------------------------------|
/// | `capacity` | `usize` | 1000    | Maximum resident entries, must be > 0    |
/// | `prealloc` | `bool`  | true    | Reserve up to [`MAX_PREALLOC`] up front  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub prealloc: bool,
}

impl CacheConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(())
    }

    /// Number of entries to reserve at construction.
    pub fn prealloc_len(&self) -> usize {
        if self.prealloc {
            self.capacity.min(MAX_PREALLOC)
        } else {
            0
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc: true,
        }
    }
}

/// Builder for [`LruCache`] and, with the `concurrency` feature,
/// [`ConcurrentLruCache`].
#[derive(Debug, Clone)]
pub struct LruCacheBuilder {
    config: CacheConfig,
}

impl LruCacheBuilder {
    /// Create a new builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig::new(capacity),
        }
    }

    /// Reserve storage for `capacity` entries at construction (default `true`).
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    /// The configuration this builder will validate.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::with_config(&self.config)
    }

    /// Builds a thread-safe cache.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. For a non-panicking
    /// alternative, use [`try_build_concurrent`](Self::try_build_concurrent).
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build_concurrent() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible [`build_concurrent`](Self::build_concurrent).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.try_build().map(ConcurrentLruCache::from)
    }
}
