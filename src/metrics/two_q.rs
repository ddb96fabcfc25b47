//! 2Q Cache Metrics
//!
//! Metrics specific to the Two-Queue cache: where hits land, how often the
//! ghost list fast-tracks a key, and how often the value loader runs.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// 2Q-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TwoQCacheMetrics {
    /// Core metrics common to both engines
    pub core: CoreCacheMetrics,

    /// Hits on entries in the probationary FIFO (each one is a promotion)
    pub probationary_hits: u64,

    /// Hits on entries already in the hot queue
    pub hot_hits: u64,

    /// Misses on keys found in the ghost list, inserted straight into Am
    pub ghost_hits: u64,

    /// Promotions from A1in to Am
    pub promotions: u64,

    /// Evictions from A1in (each one creates a ghost)
    pub probationary_evictions: u64,

    /// Evictions from Am (discarded without a ghost)
    pub hot_evictions: u64,

    /// Ghost identities forgotten because Aout overflowed
    pub ghost_drops: u64,

    /// Number of times the value loader was invoked
    pub loader_calls: u64,

    /// Number of loader invocations that returned an error
    pub loader_failures: u64,
}

impl TwoQCacheMetrics {
    /// Creates an empty set of 2Q counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit in A1in, which also promotes the entry
    pub fn record_probationary_hit(&mut self) {
        self.core.record_hit();
        self.probationary_hits += 1;
        self.promotions += 1;
    }

    /// Records a hit in Am
    pub fn record_hot_hit(&mut self) {
        self.core.record_hit();
        self.hot_hits += 1;
    }

    /// Records a miss on a key that was remembered in Aout
    pub fn record_ghost_hit(&mut self) {
        self.core.record_miss();
        self.ghost_hits += 1;
    }

    /// Records a miss on a key with no history
    pub fn record_cold_miss(&mut self) {
        self.core.record_miss();
    }

    /// Records an eviction from A1in
    pub fn record_probationary_eviction(&mut self) {
        self.core.record_eviction();
        self.probationary_evictions += 1;
    }

    /// Records an eviction from Am
    pub fn record_hot_eviction(&mut self) {
        self.core.record_eviction();
        self.hot_evictions += 1;
    }

    /// Records a ghost identity falling off the end of Aout
    pub fn record_ghost_drop(&mut self) {
        self.ghost_drops += 1;
    }

    /// Records one loader invocation and whether it succeeded
    pub fn record_load(&mut self, ok: bool) {
        self.loader_calls += 1;
        if !ok {
            self.loader_failures += 1;
        }
    }

    /// Share of hits served from the hot queue
    pub fn hot_hit_ratio(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.hot_hits as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Converts 2Q metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("probationary_hits".to_string(), self.probationary_hits as f64);
        metrics.insert("hot_hits".to_string(), self.hot_hits as f64);
        metrics.insert("ghost_hits".to_string(), self.ghost_hits as f64);
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert(
            "probationary_evictions".to_string(),
            self.probationary_evictions as f64,
        );
        metrics.insert("hot_evictions".to_string(), self.hot_evictions as f64);
        metrics.insert("ghost_drops".to_string(), self.ghost_drops as f64);
        metrics.insert("loader_calls".to_string(), self.loader_calls as f64);
        metrics.insert("loader_failures".to_string(), self.loader_failures as f64);
        metrics.insert("hot_hit_ratio".to_string(), self.hot_hit_ratio());

        metrics
    }
}

impl CacheMetrics for TwoQCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "2Q"
    }
}
