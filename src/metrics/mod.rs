//! Cache Metrics System
//!
//! Provides a small metrics system for the cache engines using BTreeMap-based
//! reporting. Each engine tracks its own specific counters on top of
//! [`CoreCacheMetrics`] and exposes them through the [`CacheMetrics`] trait.
//!
//! BTreeMap is used instead of HashMap so metrics always come out in the same
//! order, which keeps comparison reports and CSV exports reproducible.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod optimal;
pub mod two_q;

pub use optimal::OptimalCacheMetrics;
pub use two_q::TwoQCacheMetrics;

/// Common metrics tracked by both engines
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of accesses replayed against the cache
    pub requests: u64,

    /// Number of accesses served without producing the value
    pub cache_hits: u64,

    /// Number of entries removed from the cache due to capacity constraints
    pub evictions: u64,

    /// Number of entries placed into the cache
    pub insertions: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss
    ///
    /// Misses are not stored separately: they are `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an eviction due to capacity pressure
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records a new entry entering the cache
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Number of accesses that were not hits
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Hit rate between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss rate between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Resets every counter to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that both cache engines implement for metrics reporting
///
/// Lets the simulator collect and compare metrics without knowing which
/// engine produced them.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "2Q", "OPT")
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_rates() {
        let mut core = CoreCacheMetrics::new();
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);

        core.record_miss();
        core.record_hit();
        core.record_hit();
        core.record_miss();
        core.record_eviction();

        assert_eq!(core.requests, 4);
        assert_eq!(core.cache_misses(), 2);
        assert_eq!(core.hit_rate(), 0.5);
        assert_eq!(core.miss_rate(), 0.5);

        let map = core.to_btreemap();
        assert_eq!(map.get("cache_hits"), Some(&2.0));
        assert_eq!(map.get("eviction_rate"), Some(&0.25));

        core.reset();
        assert_eq!(core, CoreCacheMetrics::default());
    }
}
