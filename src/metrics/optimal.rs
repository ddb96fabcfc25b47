//! Optimal Cache Metrics

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Belady-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptimalCacheMetrics {
    /// Core metrics common to both engines
    pub core: CoreCacheMetrics,

    /// Misses on keys that never recur, which are not cached at all
    pub bypassed: u64,

    /// Misses where the resident set was full and every resident entry is
    /// needed sooner than the missing key, so nothing was replaced
    pub rejected: u64,
}

impl OptimalCacheMetrics {
    /// Creates an empty set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a miss on a key with no later occurrence
    pub fn record_bypass(&mut self) {
        self.core.record_miss();
        self.bypassed += 1;
    }

    /// Records a miss that left the full resident set unchanged
    pub fn record_rejection(&mut self) {
        self.core.record_miss();
        self.rejected += 1;
    }

    /// Converts optimal metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("bypassed".to_string(), self.bypassed as f64);
        metrics.insert("rejected".to_string(), self.rejected as f64);
        metrics
    }
}

impl CacheMetrics for OptimalCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "OPT"
    }
}
