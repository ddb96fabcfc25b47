//! Offline Optimal (Belady) Cache Implementation
//!
//! The optimal engine is a benchmark, not a cache you would deploy: it is
//! handed the whole request trace up front and replays it, always evicting
//! the resident key whose next request lies furthest in the future. No
//! online policy can score more hits on the same trace and capacity, which
//! makes it the yardstick the 2Q engine is measured against.
//!
//! # How the Algorithm Works
//!
//! A single reverse pass over the trace builds the next-use table:
//!
//! ```text
//! trace:      [ 1,  2,  3,  1,  4,  2,  5 ]
//! next_uses:  [ 3,  5,  ∞,  ∞,  ∞,  ∞,  ∞ ]     ∞ = NextUse::Never
//! ```
//!
//! Each resident entry carries the next-use value recorded at its last
//! request. Replaying position `i` with key `k`:
//!
//! | Situation                        | Action                                   |
//! |----------------------------------|------------------------------------------|
//! | `k` resident                     | hit; refresh its next-use                |
//! | miss, `k` never recurs           | bypass: caching it cannot pay off        |
//! | miss, free space                 | insert `k`                               |
//! | miss, full, victim needed later  | evict victim, insert `k`                 |
//! | miss, full, victim needed sooner | leave the resident set unchanged         |
//!
//! The victim is the resident entry with the greatest next-use, where
//! [`NextUse::Never`] beats any position. Among equal candidates the first
//! one in resident order (most recently inserted first) is chosen, so a run
//! is fully deterministic.
//!
//! # Examples
//!
//! ```
//! use twoq::OptimalCache;
//!
//! let mut cache = OptimalCache::new(4, vec![1, 2, 3, 1, 4, 2, 5]).unwrap();
//! assert_eq!(cache.run(), 2);
//!
//! // Replaying is a pure function of (capacity, trace).
//! assert_eq!(cache.run(), 2);
//! ```

extern crate alloc;

use crate::config::OptimalCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::list::{List, NodeId};
use crate::metrics::{CacheMetrics, OptimalCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

pub use crate::meta::NextUse;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Computes the next-use table of `trace` in one reverse pass.
///
/// `result[i]` is the index of the next occurrence of `trace[i]` after `i`,
/// or [`NextUse::Never`].
///
/// ```
/// use twoq::optimal::{next_uses, NextUse};
///
/// let table = next_uses(&['a', 'b', 'a']);
/// assert_eq!(table, vec![NextUse::At(2), NextUse::Never, NextUse::Never]);
/// ```
pub fn next_uses<K: Hash + Eq>(trace: &[K]) -> Vec<NextUse> {
    next_uses_with_hasher(trace, DefaultHashBuilder::default())
}

/// Same as [`next_uses`] with a caller-supplied hash builder.
pub fn next_uses_with_hasher<K, S>(trace: &[K], hash_builder: S) -> Vec<NextUse>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    let mut table = vec![NextUse::Never; trace.len()];
    let mut seen: HashMap<&K, usize, S> = HashMap::with_hasher(hash_builder);

    for (i, key) in trace.iter().enumerate().rev() {
        if let Some(later) = seen.insert(key, i) {
            table[i] = NextUse::At(later);
        }
    }
    table
}

/// Offline optimal cache replaying a fixed trace of keys.
pub struct OptimalCache<K, S = DefaultHashBuilder> {
    config: OptimalCacheConfig,
    trace: Vec<K>,
    next_uses: Vec<NextUse>,

    /// Resident entries with their recorded next-use. Front is newest.
    resident: List<(K, NextUse)>,
    index: HashMap<K, NodeId, S>,

    metrics: OptimalCacheMetrics,
}

impl<K: Hash + Eq + Clone> OptimalCache<K, DefaultHashBuilder> {
    /// Creates an optimal cache of `capacity` entries for `trace`.
    ///
    /// Fails with [`ConfigError::CapacityTooSmall`] when `capacity == 0`.
    pub fn new(capacity: usize, trace: Vec<K>) -> Result<Self, ConfigError> {
        Self::init(OptimalCacheConfig { capacity }, trace, None)
    }

    /// Creates an optimal cache from a configuration and an optional hasher.
    pub fn init(
        config: OptimalCacheConfig,
        trace: Vec<K>,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::init_with_hasher(config, trace, hasher.unwrap_or_default())
    }
}

impl<K, S> OptimalCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Creates an optimal cache with a custom hash builder.
    ///
    /// The next-use table is computed here, once per trace.
    pub fn init_with_hasher(
        config: OptimalCacheConfig,
        trace: Vec<K>,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let next_uses = next_uses_with_hasher(&trace, hash_builder.clone());

        tracing::debug!(
            capacity = config.capacity,
            trace_len = trace.len(),
            "creating optimal cache"
        );

        Ok(OptimalCache {
            config,
            trace,
            next_uses,
            resident: List::new(
                NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN),
            ),
            index: HashMap::with_capacity_and_hasher(
                config.capacity.next_power_of_two(),
                hash_builder,
            ),
            metrics: OptimalCacheMetrics::new(),
        })
    }

    /// Replays the whole trace from an empty cache and returns the hit count.
    ///
    /// Resident entries and counters are reset first, so repeated calls
    /// return the same value.
    pub fn run(&mut self) -> usize {
        self.resident.clear();
        self.index.clear();
        self.metrics = OptimalCacheMetrics::new();

        tracing::debug!(trace_len = self.trace.len(), "optimal replay started");

        for i in 0..self.trace.len() {
            self.process(i);
        }

        let hits = self.metrics.core.cache_hits as usize;
        tracing::debug!(
            hits,
            misses = self.metrics.core.cache_misses(),
            "optimal replay finished"
        );
        hits
    }

    fn process(&mut self, i: usize) {
        let next = self.next_uses[i];
        let key = &self.trace[i];

        if let Some(&node) = self.index.get(key) {
            match self.resident.get_mut(node) {
                Some(entry) => entry.1 = next,
                None => panic!("optimal index points at a missing node"),
            }
            self.metrics.core.record_hit();
            return;
        }

        if next.is_never() {
            self.metrics.record_bypass();
            return;
        }

        if !self.resident.is_full() {
            let key = key.clone();
            self.insert(key, next);
            self.metrics.core.record_miss();
            return;
        }

        let (victim, victim_next) = self.find_victim();
        if next < victim_next {
            let (evicted, _) = self
                .resident
                .remove(victim)
                .expect("victim comes from the resident list");
            self.index.remove(&evicted);
            self.metrics.core.record_eviction();
            tracing::trace!(?victim_next, ?next, "evicting furthest-used entry");

            let key = self.trace[i].clone();
            self.insert(key, next);
            self.metrics.core.record_miss();
        } else {
            self.metrics.record_rejection();
        }
    }

    fn insert(&mut self, key: K, next: NextUse) {
        let node = self.resident.add_unchecked((key.clone(), next));
        self.index.insert(key, node);
        self.metrics.core.record_insertion();
    }

    /// First resident entry with the greatest next-use.
    fn find_victim(&self) -> (NodeId, NextUse) {
        let mut best: Option<(NodeId, NextUse)> = None;
        for (node, (_, next)) in self.resident.iter() {
            match best {
                Some((_, best_next)) if *next <= best_next => {}
                _ => best = Some((node, *next)),
            }
        }
        best.expect("victim search runs on a full, non-empty resident set")
    }
}

impl<K, S> OptimalCache<K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the maximum number of resident keys.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of keys resident after the last replay.
    #[inline]
    pub fn len(&self) -> usize {
        self.resident.len()
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    /// Hits scored by the last replay.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.metrics.core.cache_hits
    }

    /// Misses scored by the last replay.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.metrics.core.cache_misses()
    }

    /// The trace this cache replays.
    pub fn trace(&self) -> &[K] {
        &self.trace
    }

    /// The precomputed next-use table, parallel to [`trace`](Self::trace).
    pub fn next_use_table(&self) -> &[NextUse] {
        &self.next_uses
    }

    /// Returns `true` if `key` is resident after the last replay.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Counters collected by the last replay.
    pub fn stats(&self) -> &OptimalCacheMetrics {
        &self.metrics
    }

    /// Verifies that the resident set respects its bound and matches the index.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.resident.len() > self.config.capacity {
            return Err(InvariantError::new(format!(
                "resident set holds {} keys, capacity is {}",
                self.resident.len(),
                self.config.capacity
            )));
        }
        if self.index.len() != self.resident.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but resident set holds {}",
                self.index.len(),
                self.resident.len()
            )));
        }
        if self.next_uses.len() != self.trace.len() {
            return Err(InvariantError::new("next-use table does not match trace"));
        }
        for (key, &node) in self.index.iter() {
            if self.resident.get(node).map(|(k, _)| k) != Some(key) {
                return Err(InvariantError::new(
                    "indexed key is not at its resident node",
                ));
            }
        }
        Ok(())
    }
}

impl<K, S> CacheMetrics for OptimalCache<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, S> fmt::Debug for OptimalCache<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimalCache")
            .field("config", &self.config)
            .field("trace_len", &self.trace.len())
            .field("resident", &self.resident.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}
