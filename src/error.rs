//! Error types for the recencache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. zero capacity).
//! - [`KeyNotFound`]: Returned by [`LruCache::try_get`](crate::policy::lru::LruCache::try_get)
//!   when the key was never inserted or has been evicted.
//! - [`InvariantError`]: Returned by `check_invariants` when the index and the
//!   recency list disagree.
//!
//! Eviction is never an error: a full cache makes room for new keys on its own.
//!
//! ## Example Usage
//!
//! ```
//! use recencache::error::{ConfigError, KeyNotFound};
//! use recencache::policy::lru::LruCache;
//!
//! let bad: Result<LruCache<u32, u32>, ConfigError> = LruCache::try_new(0);
//! assert!(bad.is_err());
//!
//! let mut cache = LruCache::new(1);
//! cache.put(1, 10);
//! cache.put(2, 20);
//! assert_eq!(cache.try_get(&1), Err(KeyNotFound));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new)
/// and [`LruCacheBuilder::try_build`](crate::builder::LruCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use recencache::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// KeyNotFound
// ---------------------------------------------------------------------------

/// The requested key is not resident in the cache.
///
/// Recoverable: callers typically compute the value and insert it, or use
/// [`LruCache::get_or_insert_with`](crate::policy::lru::LruCache::get_or_insert_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found in cache")
    }
}

impl std::error::Error for KeyNotFound {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_error<T: std::error::Error>() {}

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
        assert_eq!(err.message(), "capacity must be > 0");
    }

    #[test]
    fn config_implements_std_error() {
        assert_error::<ConfigError>();
    }

    // -- KeyNotFound ------------------------------------------------------

    #[test]
    fn key_not_found_display() {
        assert_eq!(KeyNotFound.to_string(), "key not found in cache");
    }

    #[test]
    fn key_not_found_is_boxable() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(KeyNotFound);
        assert!(boxed.to_string().contains("not found"));
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert!(format!("{:?}", err).contains("length mismatch"));
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn invariant_implements_std_error() {
        assert_error::<InvariantError>();
    }
}
