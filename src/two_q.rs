//! Two-Queue (2Q) Cache Implementation
//!
//! 2Q is a scan-resistant replacement policy that approximates frequency and
//! recency behaviour without per-key counters. It splits resident entries
//! into a **probationary FIFO** (A1in) and a **hot queue** (Am), and keeps a
//! bounded **ghost list** (Aout) of keys recently evicted from probation.
//!
//! # How the Algorithm Works
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                                2Q Cache                                      │
//! │                                                                              │
//! │   unseen key ──miss──▶ ┌──────────────────────────────────────┐              │
//! │                        │  A1in (FIFO, capacity / 2)           │              │
//! │                        │  newest ◀──▶ ... ◀──▶ oldest ────────┼──evict──┐    │
//! │                        └──────────────┬───────────────────────┘         │    │
//! │                                       │ hit: promote                    ▼    │
//! │                                       ▼                  ┌─────────────────┐ │
//! │                        ┌──────────────────────────────┐  │ Aout (keys only,│ │
//! │   ghost key ──miss───▶ │  Am (LRU, capacity - A1in)   │  │ capacity)       │ │
//! │       ▲                │  MRU ◀──▶ ... ◀──▶ LRU ──────┼─▶│ oldest dropped  │ │
//! │       │                └──────────────────────────────┘  └────────┬────────┘ │
//! │       │                          evicted: discarded               │          │
//! │       └───────────────────────────────────────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Key state        | Result | Action                                          |
//! |------------------|--------|-------------------------------------------------|
//! | in A1in          | hit    | move to Am (promotion)                          |
//! | in Am            | hit    | move to the MRU end of Am                       |
//! | in Aout          | miss   | load, insert straight into Am, forget the ghost |
//! | unknown          | miss   | load, insert into A1in                          |
//!
//! After every insertion the receiving queue is checked: if it is over its
//! bound, its oldest entry is evicted. An entry evicted from A1in leaves its
//! key in Aout (dropping the oldest ghost when Aout overflows); an entry
//! evicted from Am is discarded outright.
//!
//! A key touched once is cheaply evicted from A1in without ever reaching Am,
//! so a one-off scan cannot flush the hot set. A second request inside the
//! ghost window is taken as real reuse and skips probation.
//!
//! # Storage
//!
//! Each queue is a [`List`](crate::list) arena linked by integer indices. The
//! resident index maps a key to its queue tag and node handle, and the ghost
//! index does the same for Aout, so lookup, removal and reinsertion are O(1).
//!
//! # Thread Safety
//!
//! `TwoQCache` is **not thread-safe**. Callers sharing one instance must
//! serialize access themselves, for example with a `Mutex`.
//!
//! # Examples
//!
//! ```
//! use twoq::TwoQCache;
//!
//! let mut cache = TwoQCache::new(4, |k: &u32| k * 100).unwrap();
//!
//! assert_eq!(cache.access(1), (false, &100)); // miss, enters A1in
//! assert_eq!(cache.access(1), (true, &100));  // hit, promoted to Am
//! assert_eq!(cache.access(1), (true, &100));  // hit, stays in Am
//! assert_eq!(cache.hits(), 2);
//! ```
//!
//! ## Scan Resistance
//!
//! ```
//! use twoq::TwoQCache;
//!
//! let mut cache = TwoQCache::new(4, |k: &u32| *k).unwrap();
//! for key in [1, 2, 1, 2] {
//!     cache.access(key); // 1 and 2 end up hot
//! }
//! for key in 100..200 {
//!     cache.access(key); // one-off scan only churns A1in
//! }
//! assert_eq!(cache.access(1).0, true);
//! assert_eq!(cache.access(2).0, true);
//! ```

extern crate alloc;

use crate::config::TwoQCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::list::{List, NodeId};
use crate::loader::{FnLoader, Loader, TryFnLoader};
use crate::meta::Location;
use crate::metrics::{CacheMetrics, TwoQCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Builds a list bound from a capacity already checked by the config.
fn bound(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

/// A Two-Queue cache that produces values through a [`Loader`] on misses.
///
/// `K` is the key type, `V` the value type produced by the loader `L`, and
/// `S` the hash builder shared by the resident and ghost indexes.
pub struct TwoQCache<K, V, L, S = DefaultHashBuilder> {
    config: TwoQCacheConfig,

    /// Probationary FIFO (A1in). Front is newest, back is oldest.
    a1in: List<(K, V)>,

    /// Hot queue (Am). Front is most recently used.
    am: List<(K, V)>,

    /// Ghost list (Aout) of keys evicted from A1in. Front is newest.
    aout: List<K>,

    /// Resident index: key -> (queue tag, node in that queue).
    /// Tags are only ever `Probationary` or `Hot`.
    map: HashMap<K, (Location, NodeId), S>,

    /// Ghost index: key -> node in `aout`. Disjoint from `map`.
    ghosts: HashMap<K, NodeId, S>,

    loader: L,

    metrics: TwoQCacheMetrics,
}

impl<K, V, L> TwoQCache<K, V, L, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    L: Loader<K, V>,
{
    /// Creates a 2Q cache from a configuration, a loader and an optional hasher.
    ///
    /// Fails with [`ConfigError::CapacityTooSmall`] when `config.capacity < 2`.
    ///
    /// ```
    /// use twoq::config::TwoQCacheConfig;
    /// use twoq::loader::FnLoader;
    /// use twoq::TwoQCache;
    ///
    /// let config = TwoQCacheConfig { capacity: 16 };
    /// let mut cache = TwoQCache::init(config, FnLoader(|k: &String| k.len()), None).unwrap();
    /// assert_eq!(cache.access("hello".to_string()), (false, &5));
    /// ```
    pub fn init(
        config: TwoQCacheConfig,
        loader: L,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::init_with_hasher(config, loader, hasher.unwrap_or_default())
    }
}

impl<K, V, F> TwoQCache<K, V, FnLoader<F>, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    F: FnMut(&K) -> V,
{
    /// Creates a 2Q cache of `capacity` entries backed by an infallible closure.
    ///
    /// ```
    /// use twoq::TwoQCache;
    ///
    /// let cache = TwoQCache::new(10, |k: &u64| k.to_string()).unwrap();
    /// assert_eq!(cache.a1in_capacity(), 5);
    /// assert_eq!(cache.am_capacity(), 5);
    ///
    /// assert!(TwoQCache::new(1, |k: &u64| *k).is_err());
    /// ```
    pub fn new(capacity: usize, f: F) -> Result<Self, ConfigError> {
        Self::init(TwoQCacheConfig { capacity }, FnLoader(f), None)
    }
}

impl<K, V, F> TwoQCache<K, V, TryFnLoader<F>, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a 2Q cache of `capacity` entries backed by a fallible closure.
    ///
    /// Loader errors surface from [`TwoQCache::try_access`].
    pub fn try_new<E>(capacity: usize, f: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&K) -> Result<V, E>,
    {
        Self::init(TwoQCacheConfig { capacity }, TryFnLoader(f), None)
    }
}

impl<K, V, L, S> TwoQCache<K, V, L, S>
where
    K: Hash + Eq + Clone,
    L: Loader<K, V>,
    S: BuildHasher + Clone,
{
    /// Creates a 2Q cache with a custom hash builder.
    ///
    /// The hash builder is cloned for the ghost index.
    pub fn init_with_hasher(
        config: TwoQCacheConfig,
        loader: L,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        tracing::debug!(
            capacity = config.capacity,
            a1in = config.a1in_capacity(),
            am = config.am_capacity(),
            aout = config.ghost_capacity(),
            "creating 2Q cache"
        );

        Ok(TwoQCache {
            config,
            a1in: List::new(bound(config.a1in_capacity())),
            am: List::new(bound(config.am_capacity())),
            aout: List::new(bound(config.ghost_capacity())),
            map: HashMap::with_capacity_and_hasher(
                config.capacity.next_power_of_two(),
                hash_builder.clone(),
            ),
            ghosts: HashMap::with_capacity_and_hasher(
                config.ghost_capacity().next_power_of_two(),
                hash_builder,
            ),
            loader,
            metrics: TwoQCacheMetrics::new(),
        })
    }

    /// Looks `key` up, loading its value on a miss.
    ///
    /// Returns `(hit, value)`. On a miss the loader runs exactly once; if it
    /// fails, its error is returned and the cache is left as it was.
    pub fn try_access(&mut self, key: K) -> Result<(bool, &V), L::Error> {
        if let Some((location, node)) = self.map.get(&key).copied() {
            let node = match location {
                Location::Probationary => {
                    self.metrics.record_probationary_hit();
                    self.promote(node)
                }
                Location::Hot => {
                    self.metrics.record_hot_hit();
                    if !self.am.move_to_front(node) {
                        panic!("2Q index points at a missing Am node");
                    }
                    node
                }
                Location::Ghost => panic!("2Q resident index holds a ghost tag"),
            };
            return Ok((true, self.hot_value(node)));
        }

        let value = match self.loader.load(&key) {
            Ok(value) => {
                self.metrics.record_load(true);
                value
            }
            Err(err) => {
                self.metrics.record_load(false);
                return Err(err);
            }
        };

        if let Some(ghost) = self.ghosts.remove(&key) {
            if self.aout.remove(ghost).is_none() {
                panic!("2Q ghost index points at a missing Aout node");
            }
            self.metrics.record_ghost_hit();
            tracing::trace!(queue = "Am", "ghost key re-requested, skipping probation");
            let node = self.insert_hot(key, value);
            Ok((false, self.hot_value(node)))
        } else {
            self.metrics.record_cold_miss();
            let node = self.insert_probationary(key, value);
            Ok((false, self.probationary_value(node)))
        }
    }

    /// Moves an A1in entry to the MRU end of Am.
    fn promote(&mut self, node: NodeId) -> NodeId {
        let (key, value) = self
            .a1in
            .remove(node)
            .expect("2Q index points at a missing A1in node");
        tracing::trace!(from = "A1in", to = "Am", "promoting entry");
        // Insert without counting: the entry is already resident.
        let new_node = self.am.add_unchecked((key.clone(), value));
        self.map.insert(key, (Location::Hot, new_node));
        self.evict_hot_overflow();
        new_node
    }

    fn insert_hot(&mut self, key: K, value: V) -> NodeId {
        let node = self.am.add_unchecked((key.clone(), value));
        self.map.insert(key, (Location::Hot, node));
        self.metrics.core.record_insertion();
        self.evict_hot_overflow();
        node
    }

    fn insert_probationary(&mut self, key: K, value: V) -> NodeId {
        let node = self.a1in.add_unchecked((key.clone(), value));
        self.map.insert(key, (Location::Probationary, node));
        self.metrics.core.record_insertion();

        if self.a1in.is_over_capacity() {
            let (old_key, _) = self
                .a1in
                .remove_last()
                .expect("over-capacity A1in has a tail");
            self.map.remove(&old_key);
            self.metrics.record_probationary_eviction();
            tracing::trace!(queue = "A1in", "evicted oldest probationary entry to ghost list");
            self.remember_ghost(old_key);
        }
        node
    }

    /// Discards the LRU entry of Am if Am is over its bound.
    fn evict_hot_overflow(&mut self) {
        if self.am.is_over_capacity() {
            let (old_key, _) = self
                .am
                .remove_last()
                .expect("over-capacity Am has a tail");
            self.map.remove(&old_key);
            self.metrics.record_hot_eviction();
            tracing::trace!(queue = "Am", "evicted least recently used hot entry");
        }
    }

    fn remember_ghost(&mut self, key: K) {
        let node = self.aout.add_unchecked(key.clone());
        self.ghosts.insert(key, node);
        if self.aout.is_over_capacity() {
            let dropped = self
                .aout
                .remove_last()
                .expect("over-capacity Aout has a tail");
            self.ghosts.remove(&dropped);
            self.metrics.record_ghost_drop();
        }
    }

    fn hot_value(&self, node: NodeId) -> &V {
        match self.am.get(node) {
            Some((_, v)) => v,
            None => panic!("2Q index points at a missing Am node"),
        }
    }

    fn probationary_value(&self, node: NodeId) -> &V {
        match self.a1in.get(node) {
            Some((_, v)) => v,
            None => panic!("2Q index points at a missing A1in node"),
        }
    }
}

impl<K, V, F, S> TwoQCache<K, V, FnLoader<F>, S>
where
    K: Hash + Eq + Clone,
    F: FnMut(&K) -> V,
    S: BuildHasher + Clone,
{
    /// Looks `key` up, loading its value on a miss. Returns `(hit, value)`.
    ///
    /// Available when the loader cannot fail.
    pub fn access(&mut self, key: K) -> (bool, &V) {
        match self.try_access(key) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<K, V, L, S> TwoQCache<K, V, L, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the configuration the cache was built with.
    #[inline]
    pub fn config(&self) -> TwoQCacheConfig {
        self.config
    }

    /// Returns the total resident capacity (A1in + Am).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Returns the capacity of the probationary FIFO.
    #[inline]
    pub fn a1in_capacity(&self) -> usize {
        self.config.a1in_capacity()
    }

    /// Returns the capacity of the hot queue.
    #[inline]
    pub fn am_capacity(&self) -> usize {
        self.config.am_capacity()
    }

    /// Returns the capacity of the ghost list.
    #[inline]
    pub fn ghost_capacity(&self) -> usize {
        self.config.ghost_capacity()
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no entries are resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of entries in A1in.
    #[inline]
    pub fn a1in_len(&self) -> usize {
        self.a1in.len()
    }

    /// Number of entries in Am.
    #[inline]
    pub fn am_len(&self) -> usize {
        self.am.len()
    }

    /// Number of keys in Aout.
    #[inline]
    pub fn ghost_len(&self) -> usize {
        self.aout.len()
    }

    /// Returns `true` if `key` is resident (A1in or Am).
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns `true` if `key` is remembered in the ghost list.
    pub fn is_ghost(&self, key: &K) -> bool {
        self.ghosts.contains_key(key)
    }

    /// Returns which container owns `key`, if any.
    pub fn location(&self, key: &K) -> Option<Location> {
        match self.map.get(key) {
            Some(&(location, _)) => Some(location),
            None if self.ghosts.contains_key(key) => Some(Location::Ghost),
            None => None,
        }
    }

    /// Returns the resident value for `key` without touching queue order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &(location, node) = self.map.get(key)?;
        let entry = match location {
            Location::Probationary => self.a1in.get(node),
            Location::Hot => self.am.get(node),
            Location::Ghost => None,
        };
        entry.map(|(_, v)| v)
    }

    /// Keys in A1in from newest to oldest.
    pub fn probationary_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.a1in.iter().map(|(_, (k, _))| k)
    }

    /// Keys in Am from most to least recently used.
    pub fn hot_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.am.iter().map(|(_, (k, _))| k)
    }

    /// Keys in Aout from newest to oldest.
    pub fn ghost_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.aout.iter().map(|(_, k)| k)
    }

    /// Number of accesses served without calling the loader.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.metrics.core.cache_hits
    }

    /// Number of accesses that called the loader successfully.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.metrics.core.cache_misses()
    }

    /// Returns the engine's counters.
    #[inline]
    pub fn stats(&self) -> &TwoQCacheMetrics {
        &self.metrics
    }

    /// Drops every resident entry and ghost. Counters are kept.
    pub fn clear(&mut self) {
        self.a1in.clear();
        self.am.clear();
        self.aout.clear();
        self.map.clear();
        self.ghosts.clear();
    }

    /// Verifies the structural invariants of the cache.
    ///
    /// Checks queue bounds, that every indexed key sits in the queue its tag
    /// names, that queue and index sizes agree, and that no key is both
    /// resident and ghosted.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.a1in.len() > self.a1in_capacity() {
            return Err(InvariantError::new(format!(
                "A1in holds {} entries, bound is {}",
                self.a1in.len(),
                self.a1in_capacity()
            )));
        }
        if self.am.len() > self.am_capacity() {
            return Err(InvariantError::new(format!(
                "Am holds {} entries, bound is {}",
                self.am.len(),
                self.am_capacity()
            )));
        }
        if self.aout.len() > self.ghost_capacity() {
            return Err(InvariantError::new(format!(
                "Aout holds {} keys, bound is {}",
                self.aout.len(),
                self.ghost_capacity()
            )));
        }
        if self.map.len() != self.a1in.len() + self.am.len() {
            return Err(InvariantError::new(format!(
                "resident index has {} keys but queues hold {}",
                self.map.len(),
                self.a1in.len() + self.am.len()
            )));
        }
        if self.ghosts.len() != self.aout.len() {
            return Err(InvariantError::new(format!(
                "ghost index has {} keys but Aout holds {}",
                self.ghosts.len(),
                self.aout.len()
            )));
        }

        for (key, &(location, node)) in self.map.iter() {
            let queued = match location {
                Location::Probationary => self.a1in.get(node).map(|(k, _)| k),
                Location::Hot => self.am.get(node).map(|(k, _)| k),
                Location::Ghost => {
                    return Err(InvariantError::new("resident index holds a ghost tag"));
                }
            };
            if queued != Some(key) {
                return Err(InvariantError::new(format!(
                    "resident key is not at its indexed {} node",
                    location.queue_name()
                )));
            }
            if self.ghosts.contains_key(key) {
                return Err(InvariantError::new("key is both resident and ghosted"));
            }
        }

        for (key, &node) in self.ghosts.iter() {
            if self.aout.get(node) != Some(key) {
                return Err(InvariantError::new(
                    "ghost key is not at its indexed Aout node",
                ));
            }
        }

        Ok(())
    }
}

impl<K, V, L, S> CacheMetrics for TwoQCache<K, V, L, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, L, S> fmt::Debug for TwoQCache<K, V, L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoQCache")
            .field("config", &self.config)
            .field("a1in_len", &self.a1in.len())
            .field("am_len", &self.am.len())
            .field("aout_len", &self.aout.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    fn keys<'a>(it: impl Iterator<Item = &'a u32>) -> Vec<u32> {
        it.copied().collect()
    }

    fn replay(capacity: usize, trace: &[u32]) -> u64 {
        let mut cache = TwoQCache::new(capacity, |k: &u32| *k).unwrap();
        for &key in trace {
            cache.access(key);
            cache.check_invariants().unwrap();
        }
        cache.hits()
    }

    #[test]
    fn test_two_q_rejects_small_capacity() {
        assert!(TwoQCache::new(0, |k: &u32| *k).is_err());
        assert!(TwoQCache::new(1, |k: &u32| *k).is_err());
        assert!(TwoQCache::new(2, |k: &u32| *k).is_ok());
    }

    #[test]
    fn test_two_q_miss_then_promotion() {
        let mut cache = TwoQCache::new(4, |k: &u32| k.to_string()).unwrap();

        let (hit, value) = cache.access(7);
        assert!(!hit);
        assert_eq!(value, "7");
        assert_eq!(cache.location(&7), Some(Location::Probationary));

        let (hit, value) = cache.access(7);
        assert!(hit);
        assert_eq!(value, "7");
        assert_eq!(cache.location(&7), Some(Location::Hot));
        assert_eq!(cache.a1in_len(), 0);
        assert_eq!(cache.am_len(), 1);
        assert_eq!(cache.stats().promotions, 1);
    }

    #[test]
    fn test_two_q_probationary_is_fifo() {
        let mut cache = TwoQCache::new(4, |k: &u32| *k).unwrap();
        cache.access(1);
        cache.access(2);
        cache.access(3);

        // A1in holds two entries; 1 was the oldest and becomes a ghost.
        assert_eq!(keys(cache.probationary_keys()), vec![3, 2]);
        assert_eq!(keys(cache.ghost_keys()), vec![1]);
        assert_eq!(cache.location(&1), Some(Location::Ghost));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_two_q_ghost_hit_skips_probation() {
        let loads = Cell::new(0);
        let mut cache = TwoQCache::new(4, |k: &u32| {
            loads.set(loads.get() + 1);
            *k
        })
        .unwrap();

        for key in [1, 2, 3] {
            cache.access(key);
        }
        assert!(cache.is_ghost(&1));

        let (hit, _) = cache.access(1);
        assert!(!hit);
        assert_eq!(cache.location(&1), Some(Location::Hot));
        assert!(!cache.is_ghost(&1));
        assert_eq!(cache.stats().ghost_hits, 1);
        assert_eq!(loads.get(), 4);
    }

    #[test]
    fn test_two_q_hot_queue_is_lru() {
        // capacity 4: A1in 2, Am 2
        let mut cache = TwoQCache::new(4, |k: &u32| *k).unwrap();
        for key in [1, 1, 2, 2] {
            cache.access(key);
        }
        assert_eq!(keys(cache.hot_keys()), vec![2, 1]);

        // Touch 1 so 2 becomes the LRU entry of Am.
        assert!(cache.access(1).0);
        assert_eq!(keys(cache.hot_keys()), vec![1, 2]);

        // Promote 3; Am overflows and discards 2 without a ghost.
        cache.access(3);
        cache.access(3);
        assert_eq!(keys(cache.hot_keys()), vec![3, 1]);
        assert_eq!(cache.location(&2), None);
        assert_eq!(cache.stats().hot_evictions, 1);
    }

    #[test]
    fn test_two_q_ghost_list_is_bounded() {
        let mut cache = TwoQCache::new(2, |k: &u32| *k).unwrap();
        for key in 0..10 {
            cache.access(key);
        }
        assert_eq!(cache.ghost_len(), 2);
        assert_eq!(keys(cache.ghost_keys()), vec![8, 7]);
        assert_eq!(cache.stats().ghost_drops, 7);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_two_q_loader_failure_leaves_state_untouched() {
        let mut cache = TwoQCache::try_new(4, |k: &u32| {
            if *k == 13 {
                Err("unlucky")
            } else {
                Ok(*k)
            }
        })
        .unwrap();

        assert_eq!(cache.try_access(1), Ok((false, &1)));
        assert_eq!(cache.try_access(13), Err("unlucky"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.location(&13), None);
        assert_eq!(cache.stats().loader_failures, 1);
        assert_eq!(cache.misses(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_two_q_peek_does_not_reorder() {
        let mut cache = TwoQCache::new(4, |k: &u32| *k * 2).unwrap();
        for key in [1, 1, 2, 2] {
            cache.access(key);
        }
        assert_eq!(cache.peek(&1), Some(&2));
        assert_eq!(keys(cache.hot_keys()), vec![2, 1]);
        assert_eq!(cache.peek(&9), None);
    }

    #[test]
    fn test_two_q_reference_traces() {
        assert_eq!(replay(4, &[1, 2, 3, 1, 4, 2, 5]), 0);
        assert_eq!(replay(6, &[1, 2, 3, 1, 2, 3, 4, 5, 6]), 3);
        assert_eq!(replay(4, &[1, 2, 1, 2, 1, 2, 1, 2]), 6);
        assert_eq!(
            replay(6, &[1, 2, 3, 4, 4, 5, 2, 3, 3, 7, 8, 9, 1, 2, 3]),
            6
        );
        assert_eq!(
            replay(8, &[1, 2, 3, 4, 5, 6, 3, 5, 8, 9, 6, 10, 5, 3, 4, 2]),
            6
        );
    }

    #[test]
    fn test_two_q_clear() {
        let mut cache = TwoQCache::new(4, |k: &u32| *k).unwrap();
        for key in [1, 2, 3, 2] {
            cache.access(key);
        }
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.ghost_len(), 0);
        assert_eq!(cache.location(&2), None);
        assert!(!cache.access(2).0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_two_q_string_keys_and_metrics() {
        let mut cache = TwoQCache::new(6, |k: &String| k.len()).unwrap();
        for word in ["alpha", "beta", "alpha", "gamma"] {
            cache.access(word.to_string());
        }
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("loader_calls"), Some(&3.0));
        assert_eq!(cache.algorithm_name(), "2Q");
    }
}
