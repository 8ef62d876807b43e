//! # Cache Trait Hierarchy
//!
//! Traits that describe what a bounded recency cache can do, split so that
//! generic code asks only for the capability it needs.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K]) → Vec<Option<V>>    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           LruCacheTrait<K, V>           │
//!   │                                         │
//!   │  pop_lru() → Option<(K, V)>             │
//!   │  peek_lru() → Option<(&K, &V)>          │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → Option<usize>       │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! | Trait             | Extends        | Purpose                            |
//! |-------------------|----------------|------------------------------------|
//! | `CoreCache`       | -              | Universal cache operations         |
//! | `MutableCache`    | `CoreCache`    | Adds arbitrary key removal         |
//! | `LruCacheTrait`   | `MutableCache` | Recency-specific eviction and rank |
//! | `ConcurrentCache` | `Send + Sync`  | Marker for thread-safe caches      |
//!
//! ## Thread Safety
//!
//! The traits take `&mut self` for anything that reorders entries, so an
//! implementation is single-threaded unless it is wrapped. Thread-safe
//! wrappers such as `ConcurrentLruCache` carry the [`ConcurrentCache`] marker.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use recencache::traits::CoreCache;
/// use recencache::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and the key is new, an entry is evicted
    /// according to the cache's policy before the new entry is inserted.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction order. Use [`contains`](Self::contains) to test
    /// for presence without affecting it.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use recencache::traits::{CoreCache, MutableCache};
/// use recencache::policy::lru::LruCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// cache.put(1, "one".to_string());
/// cache.put(2, "two".to_string());
/// cache.put(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    ///
    /// ```
    /// use recencache::traits::MutableCache;
    /// use recencache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.put(1, "one");
    /// cache.put(2, "two");
    /// cache.put(3, "three");
    ///
    /// let removed = cache.remove_batch(&[1, 99, 3]);
    /// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect recency order.
///
/// # Example
///
/// ```
/// use recencache::traits::{CoreCache, LruCacheTrait};
/// use recencache::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.put(1, "first");
/// cache.put(2, "second");
/// cache.put(3, "third");
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving value
/// assert!(cache.touch(&2));  // Now key 3 is LRU
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or changing order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less recent).
    ///
    /// ```
    /// use recencache::traits::LruCacheTrait;
    /// use recencache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.put(1, "first");
    /// cache.put(2, "second");
    /// cache.put(3, "third");
    ///
    /// assert_eq!(cache.recency_rank(&3), Some(0));
    /// assert_eq!(cache.recency_rank(&1), Some(2));
    /// assert_eq!(cache.recency_rank(&99), None);
    /// ```
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker trait for caches that are safe to share across threads.
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use recencache::traits::ConcurrentCache;
/// use recencache::policy::lru::ConcurrentLruCache;
///
/// fn assert_shared<C: ConcurrentCache>(_: &C) {}
///
/// let cache: ConcurrentLruCache<u64, String> = ConcurrentLruCache::new(8);
/// assert_shared(&cache);
/// # }
/// ```
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Unbounded map used to exercise the default trait methods in isolation.
    struct MapCache {
        map: HashMap<u32, u32>,
    }

    impl CoreCache<u32, u32> for MapCache {
        fn insert(&mut self, key: u32, value: u32) -> Option<u32> {
            self.map.insert(key, value)
        }

        fn get(&mut self, key: &u32) -> Option<&u32> {
            self.map.get(key)
        }

        fn contains(&self, key: &u32) -> bool {
            self.map.contains_key(key)
        }

        fn len(&self) -> usize {
            self.map.len()
        }

        fn capacity(&self) -> usize {
            usize::MAX
        }

        fn clear(&mut self) {
            self.map.clear();
        }
    }

    impl MutableCache<u32, u32> for MapCache {
        fn remove(&mut self, key: &u32) -> Option<u32> {
            self.map.remove(key)
        }
    }

    #[test]
    fn is_empty_defaults_to_len() {
        let mut cache = MapCache {
            map: HashMap::new(),
        };
        assert!(cache.is_empty());
        cache.insert(1, 1);
        assert!(!cache.is_empty());
    }

    #[test]
    fn remove_batch_preserves_input_order() {
        let mut cache = MapCache {
            map: HashMap::new(),
        };
        cache.insert(1, 10);
        cache.insert(2, 20);
        assert_eq!(cache.remove_batch(&[2, 3, 1]), vec![Some(20), None, Some(10)]);
        assert!(cache.is_empty());
    }
}
