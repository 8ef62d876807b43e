//! # Least Recently Used (LRU) Cache
//!
//! A bounded key→value store with O(1) `get`/`put` that evicts the entry
//! which has gone longest without being read or written.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │                                                              │   │
//!   │   │   key_a ──────────────┐                                      │   │
//!   │   │   key_b ──────────────┼──────────┐                           │   │
//!   │   │   key_c ──────────────┼──────────┼──────────┐                │   │
//!   │   └───────────────────────┼──────────┼──────────┼────────────────┘   │
//!   │                           ▼          ▼          ▼                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (owns every entry)                │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [a, 1] ◄──► [b, 2] ◄──► [c, 3] ◄── tail            │   │
//!   │   │           (MRU)                    (LRU)                     │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list's arena is the only owner of entries. The index holds copies of
//! the generational `SlotId` handles, so eviction never leaves a dangling
//! reference behind: a stale handle simply stops resolving.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) on a full cache (capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop [C] from the tail, drop C from the index
//!     2. push [D] at the head, index D
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. index lookup B → SlotId
//!     2. move_to_front(SlotId)
//!     head ──► [B] ◄──► [A] ◄──► [C] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method                  | Complexity | Description                               |
//! |-------------------------|------------|-------------------------------------------|
//! | `new(capacity)`         | O(1)       | Create cache, panics on zero capacity     |
//! | `try_new(capacity)`     | O(1)       | Create cache, `ConfigError` on zero       |
//! | `put(k, v)`             | O(1)       | Insert or update, may evict LRU           |
//! | `push(k, v)`            | O(1)       | `put` that returns the displaced pair     |
//! | `get(&k)`               | O(1)       | Get value, moves to MRU position          |
//! | `try_get(&k)`           | O(1)       | `get` with `KeyNotFound` on a miss        |
//! | `get_mut(&k)`           | O(1)       | Mutable `get`, moves to MRU position      |
//! | `get_or_insert_with`    | O(1)       | Hit promotes, miss computes and inserts   |
//! | `peek(&k)`              | O(1)       | Get value without affecting order         |
//! | `contains(&k)`          | O(1)       | Check if key exists                       |
//! | `remove(&k)`            | O(1)       | Remove entry by key                       |
//! | `pop_lru()`             | O(1)       | Remove and return least recently used     |
//! | `peek_lru()` / `peek_mru()` | O(1)   | Look at either end of the order           |
//! | `touch(&k)`             | O(1)       | Move to MRU without returning value       |
//! | `recency_rank(&k)`      | O(n)       | Position in recency order (0 = MRU)       |
//! | `iter()` / `keys()`     | O(n)       | MRU → LRU traversal, no reordering        |
//! | `clear()`               | O(n)       | Remove all entries                        |
//!
//! ## Thread Safety
//!
//! - `LruCache`: **not** internally synchronized; mutation takes `&mut self`.
//! - `ConcurrentLruCache` (feature `concurrency`): index and list behind one
//!   `parking_lot::RwLock`, so a promoting read can never interleave with an
//!   eviction.
//!
//! ## Example Usage
//!
//! ```
//! use recencache::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//!
//! // key 2 is now least recently used
//! cache.put(3, "three");
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some(&"three"));
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builder::CacheConfig;
use crate::ds::recency_list::{RecencyList, RecencyListIter};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError, KeyNotFound};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Capacity used by [`Default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// One resident key-value pair. Links live in the list node around it.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Result of the shared insert path behind `put` and `push`.
enum Upsert<K, V> {
    /// Key was resident; carries the caller's key and the replaced value.
    Updated(K, V),
    /// Key was new; carries the entry evicted to make room, if any.
    Inserted(Option<(K, V)>),
}

/// Fixed-capacity cache with least-recently-used eviction.
///
/// Keys are cloned once on insert (one copy in the index, one in the
/// entry) so the evicted key can be dropped from the index in O(1).
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    ///
    /// # Example
    /// ```
    /// use recencache::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(&CacheConfig {
            capacity,
            ..CacheConfig::default()
        })
    }

    /// Creates a cache from a validated [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let reserve = config.prealloc_len();
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: RecencyList::with_capacity(reserve),
            capacity: config.capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Returns `None` if the key was never inserted or has been evicted.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.promote(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get), reporting a miss as [`KeyNotFound`].
    ///
    /// ```
    /// use recencache::error::KeyNotFound;
    /// use recencache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// cache.put("a", 1);
    /// assert_eq!(cache.try_get(&"a"), Ok(&1));
    /// assert_eq!(cache.try_get(&"b"), Err(KeyNotFound));
    /// ```
    #[inline]
    pub fn try_get(&mut self, key: &K) -> Result<&V, KeyNotFound> {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Mutable access to the value for `key`; promotes like [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.promote(key)?;
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the value without changing recency order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let &id = self.index.get(key)?;
        let value = self.order.get(id).map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_peek_found();
        }

        value
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or updates `key`, returning the replaced value on update.
    ///
    /// A new key on a full cache first evicts the least recently used
    /// entry. Either way `key` ends up most recently used.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.upsert(key, value) {
            Upsert::Updated(_, old) => Some(old),
            Upsert::Inserted(_) => None,
        }
    }

    /// Inserts or updates `key`, handing back whatever was displaced.
    ///
    /// Returns the old `(key, value)` on update, the evicted LRU pair when a
    /// new key pushed one out, and `None` when the cache had room.
    ///
    /// ```
    /// use recencache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(1);
    /// assert_eq!(cache.push(1, "a"), None);
    /// assert_eq!(cache.push(1, "b"), Some((1, "a")));
    /// assert_eq!(cache.push(2, "c"), Some((1, "b")));
    /// ```
    #[inline]
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.upsert(key, value) {
            Upsert::Updated(key, old) => Some((key, old)),
            Upsert::Inserted(evicted) => evicted,
        }
    }

    /// Returns the value for `key`, computing and inserting it on a miss.
    ///
    /// A hit promotes the entry; a miss may evict the LRU entry.
    ///
    /// ```
    /// use recencache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// let mut computed = 0;
    /// let v = *cache.get_or_insert_with(7, || { computed += 1; 49 });
    /// assert_eq!(v, 49);
    /// let v = *cache.get_or_insert_with(7, || { computed += 1; 0 });
    /// assert_eq!(v, 49);
    /// assert_eq!(computed, 1);
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &V
    where
        F: FnOnce() -> V,
    {
        match self.get_or_try_insert_with(key, || Ok::<V, std::convert::Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// If `f` fails nothing is inserted and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`.
    pub fn get_or_try_insert_with<F, E>(&mut self, key: K, f: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let id = match self.promote(&key) {
            Some(id) => id,
            None => {
                let value = f()?;

                #[cfg(feature = "metrics")]
                self.metrics.record_insert_call();

                self.insert_new(key, value).0
            },
        };
        Ok(self.value_at(id))
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.order.remove(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        #[cfg(feature = "metrics")]
        if entry.is_some() {
            self.metrics.record_remove_found();
        }

        entry.map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    /// The next eviction candidate, without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// The most recently used entry, without touching it.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Marks `key` most recently used; returns `false` if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let moved = self.order.move_to_front(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        #[cfg(feature = "metrics")]
        if moved {
            self.metrics.record_touch_found();
        }

        moved
    }

    /// Position of `key` in recency order, 0 being most recent. O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.index.get(key)?;
        for (rank, (id, _)) in self.order.iter_entries().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of resident entries; fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let dropped = self.index.len();
        self.index.clear();
        self.order.clear();
        tracing::debug!(dropped, capacity = self.capacity, "lru cache cleared");
    }

    /// Iterates `(key, value)` pairs from most to least recently used.
    ///
    /// Iteration does not change recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.order.iter(),
        }
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Checks that the index and the recency list describe the same entries.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] naming the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.order.iter_entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "entry at slot {} is not indexed by its own key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    /// Looks up `key` and moves it to the front, recording hit or miss.
    #[inline]
    fn promote(&mut self, key: &K) -> Option<SlotId> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(id)
    }

    fn upsert(&mut self, key: K, value: V) -> Upsert<K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();

                let old = mem::replace(&mut entry.value, value);
                self.order.move_to_front(id);

                #[cfg(debug_assertions)]
                self.validate_invariants();

                return Upsert::Updated(key, old);
            }
        }

        let (_, evicted) = self.insert_new(key, value);
        Upsert::Inserted(evicted)
    }

    /// Inserts an absent key at the front, evicting first if full.
    fn insert_new(&mut self, key: K, value: V) -> (SlotId, Option<(K, V)>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let evicted = if self.index.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        (id, evicted)
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        tracing::trace!(
            len = self.index.len(),
            capacity = self.capacity,
            "evicted least recently used entry"
        );

        Some((entry.key, entry.value))
    }

    fn value_at(&self, id: SlotId) -> &V {
        match self.order.get(id) {
            Some(entry) => &entry.value,
            None => panic!("indexed slot {} is not resident", id.index()),
        }
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("lru invariant violated: {}", err);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a capacity of [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// MRU → LRU iterator returned by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: RecencyListIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Thread-safe LRU cache: one `RwLock` guards index and list together.
///
/// Reads that promote (`get`) need the write lock; `peek`, `contains` and the
/// size accessors take the read lock. Values come back by clone, so store
/// `Arc<T>` to share large payloads; the cache drops its clone on eviction.
///
/// ```
/// use recencache::policy::lru::ConcurrentLruCache;
/// use std::thread;
///
/// let cache = ConcurrentLruCache::new(64);
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             for i in 0..16 {
///                 cache.put(t * 100 + i, i);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(cache.len(), 64);
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.index.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a concurrent LRU cache with a capacity of [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> From<LruCache<K, V>> for ConcurrentLruCache<K, V> {
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a thread-safe cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        LruCache::new(capacity).into()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from)
    }

    /// Inserts or updates `key` (write lock).
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.write().put(key, value)
    }

    /// Inserts or updates `key`, returning the displaced pair (write lock).
    pub fn push(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.write().push(key, value)
    }

    /// Removes `key` (write lock).
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    /// Promotes `key` without reading it (write lock).
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Removes and returns the LRU entry (write lock).
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` with exclusive access, for multi-step updates that must not
    /// interleave with other callers.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        let mut cache = self.inner.write();
        f(&mut cache)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns a clone of the value and promotes it (write lock).
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    /// [`get`](Self::get) reporting a miss as [`KeyNotFound`].
    pub fn try_get(&self, key: &K) -> Result<V, KeyNotFound> {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Returns a clone of the value without promoting it (read lock).
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    /// Clones the LRU entry without removing it (read lock).
    pub fn peek_lru(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .peek_lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Compute-and-insert under the write lock; `f` runs at most once.
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.inner.write().get_or_insert_with(key, f).clone()
    }

    /// Snapshot of all entries, MRU first (read lock).
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.inner
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Get(u8),
        Put(u8, u16),
        Remove(u8),
        Touch(u8),
        PopLru,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u8>().prop_map(|k| Op::Get(k % 32)),
            4 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Put(k % 32, v)),
            1 => any::<u8>().prop_map(|k| Op::Remove(k % 32)),
            1 => any::<u8>().prop_map(|k| Op::Touch(k % 32)),
            1 => Just(Op::PopLru),
        ]
    }

    /// Reference model: MRU-first vector with linear scans.
    #[derive(Default)]
    struct Model {
        entries: Vec<(u8, u16)>,
    }

    impl Model {
        fn promote(&mut self, key: u8) -> Option<u16> {
            let pos = self.entries.iter().position(|(k, _)| *k == key)?;
            let entry = self.entries.remove(pos);
            self.entries.insert(0, entry);
            Some(entry.1)
        }

        fn put(&mut self, key: u8, value: u16, capacity: usize) {
            if self.promote(key).is_some() {
                self.entries[0].1 = value;
                return;
            }
            if self.entries.len() == capacity {
                self.entries.pop();
            }
            self.entries.insert(0, (key, value));
        }
    }

    proptest! {
        /// len() never exceeds capacity.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_len_within_capacity(
            capacity in 1usize..64,
            ops in prop::collection::vec((0u32..500, 0u32..100), 0..300)
        ) {
            let mut cache = LruCache::new(capacity);
            for (key, value) in ops {
                cache.put(key, value);
                prop_assert!(cache.len() <= cache.capacity());
            }
        }

        /// Every operation agrees with a naive ordered-vector model.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 1usize..12,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            let mut cache = LruCache::new(capacity);
            let mut model = Model::default();

            for op in ops {
                match op {
                    Op::Get(k) => {
                        prop_assert_eq!(cache.get(&k).copied(), model.promote(k));
                    },
                    Op::Put(k, v) => {
                        cache.put(k, v);
                        model.put(k, v, capacity);
                    },
                    Op::Remove(k) => {
                        let expected = model
                            .entries
                            .iter()
                            .position(|(mk, _)| *mk == k)
                            .map(|pos| model.entries.remove(pos).1);
                        prop_assert_eq!(cache.remove(&k), expected);
                    },
                    Op::Touch(k) => {
                        prop_assert_eq!(cache.touch(&k), model.promote(k).is_some());
                    },
                    Op::PopLru => {
                        prop_assert_eq!(cache.pop_lru(), model.entries.pop());
                    },
                }
                let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&actual, &model.entries);
                prop_assert!(cache.check_invariants().is_ok());
            }
        }

        /// Sequential distinct inserts leave exactly the last `capacity` keys.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_sequential_inserts_keep_tail(capacity in 1usize..32, n in 0usize..100) {
            let mut cache = LruCache::new(capacity);
            for i in 0..n {
                cache.put(i, i);
            }
            let first_resident = n.saturating_sub(capacity);
            for i in 0..n {
                prop_assert_eq!(cache.contains(&i), i >= first_resident);
            }
        }
    }
}
