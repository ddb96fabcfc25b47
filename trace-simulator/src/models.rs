//! Data models for trace simulation

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Replacement policies that can be simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Policy {
    /// Online Two-Queue cache
    TwoQ,
    /// Offline optimal (Belady) cache
    Optimal,
}

impl Policy {
    /// Short label used in tables and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::TwoQ => "2Q",
            Policy::Optimal => "OPT",
        }
    }

    /// Get all available policies
    pub fn all() -> Vec<Policy> {
        vec![Policy::TwoQ, Policy::Optimal]
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a trace comes from and what to do with it
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// Trace file; stdin when `None`
    pub input: Option<PathBuf>,
    /// Reprompt on malformed stdin input instead of failing
    pub interactive: bool,
    /// Policies to replay the trace through
    pub policies: Vec<Policy>,
    /// Optional CSV destination for the comparison
    pub output_csv: Option<PathBuf>,
}

/// Outcome of replaying one trace through one policy
#[derive(Debug, Clone)]
pub struct PolicyReport {
    /// Policy that was replayed
    pub policy: Policy,
    /// Cache capacity used for the replay
    pub capacity: usize,
    /// Requests served from the cache
    pub hits: u64,
    /// Requests that were not
    pub misses: u64,
    /// Wall time of the replay, construction included
    pub elapsed: Duration,
    /// Engine counters as reported by `CacheMetrics`
    pub metrics: BTreeMap<String, f64>,
}

impl PolicyReport {
    /// Total requests replayed
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Look up one engine counter, or 0 if the engine does not report it
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }
}

/// Reports for several policies replayed over the same trace
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// Cache capacity from the trace header
    pub capacity: usize,
    /// Number of requests in the trace
    pub trace_len: usize,
    /// Number of distinct keys in the trace
    pub unique_keys: usize,
    /// One report per simulated policy
    pub reports: Vec<PolicyReport>,
}

impl ComparisonResult {
    /// Report for `policy`, if it was simulated
    pub fn report(&self, policy: Policy) -> Option<&PolicyReport> {
        self.reports.iter().find(|r| r.policy == policy)
    }

    /// Percentage of the optimal hit count achieved by 2Q
    ///
    /// `None` unless both policies ran; 100% when the optimum is zero hits.
    pub fn two_q_efficiency(&self) -> Option<f64> {
        let two_q = self.report(Policy::TwoQ)?;
        let optimal = self.report(Policy::Optimal)?;
        if optimal.hits == 0 {
            return Some(100.0);
        }
        Some(two_q.hits as f64 / optimal.hits as f64 * 100.0)
    }
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    /// Policy label, `2Q` or `OPT`
    pub policy: String,
    /// Cache capacity
    pub capacity: usize,
    /// Requests replayed
    pub requests: u64,
    /// Requests served from the cache
    pub hits: u64,
    /// Requests that missed
    pub misses: u64,
    /// Hit rate in percent
    pub hit_rate: f64,
    /// Entries evicted during the replay
    pub evictions: u64,
    /// Entries inserted during the replay
    pub insertions: u64,
    /// Replay wall time in microseconds
    pub elapsed_us: u64,
}

impl From<&PolicyReport> for CsvResultRow {
    fn from(report: &PolicyReport) -> Self {
        Self {
            policy: report.policy.as_str().to_string(),
            capacity: report.capacity,
            requests: report.requests(),
            hits: report.hits,
            misses: report.misses,
            hit_rate: report.hit_rate(),
            evictions: report.metric("evictions") as u64,
            insertions: report.metric("insertions") as u64,
            elapsed_us: report.elapsed.as_micros() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(policy: Policy, hits: u64, misses: u64) -> PolicyReport {
        PolicyReport {
            policy,
            capacity: 4,
            hits,
            misses,
            elapsed: Duration::from_micros(1500),
            metrics: BTreeMap::from([("evictions".to_string(), 3.0)]),
        }
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(report(Policy::TwoQ, 1, 3).hit_rate(), 25.0);
        assert_eq!(report(Policy::TwoQ, 0, 0).hit_rate(), 0.0);
    }

    #[test]
    fn test_two_q_efficiency() {
        let result = ComparisonResult {
            capacity: 4,
            trace_len: 10,
            unique_keys: 5,
            reports: vec![report(Policy::TwoQ, 3, 7), report(Policy::Optimal, 6, 4)],
        };
        assert_eq!(result.two_q_efficiency(), Some(50.0));

        let partial = ComparisonResult {
            reports: vec![report(Policy::TwoQ, 3, 7)],
            ..result
        };
        assert_eq!(partial.two_q_efficiency(), None);
    }

    #[test]
    fn test_csv_row_from_report() {
        let row = CsvResultRow::from(&report(Policy::Optimal, 2, 5));
        assert_eq!(row.policy, "OPT");
        assert_eq!(row.requests, 7);
        assert_eq!(row.evictions, 3);
        assert_eq!(row.insertions, 0);
        assert_eq!(row.elapsed_us, 1500);
    }
}
