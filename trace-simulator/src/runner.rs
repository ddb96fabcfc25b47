//! Simulation runner for the cache engines
//!
//! Replays a [`Trace`] through the 2Q and optimal engines and collects a
//! [`PolicyReport`] per engine. Both engines hash with `ahash`, the same
//! hasher the simulator uses everywhere else.
//!
//! The 2Q engine needs a value for every miss; the runner's loader builds
//! the string `data_for_key_<key>` so misses pay a small, realistic cost.
//!
//! The module also carries the built-in reference [`SCENARIOS`], small
//! traces whose hit counts are known for both engines.

use std::time::Instant;

use ahash::RandomState as AHashRandomState;
use twoq::config::{OptimalCacheConfig, TwoQCacheConfig};
use twoq::metrics::CacheMetrics;
use twoq::{FnLoader, OptimalCache, TwoQCache};

use crate::error::SimulationError;
use crate::input::Trace;
use crate::models::{ComparisonResult, Policy, PolicyReport};

/// Value produced for a key on a 2Q miss
pub fn load_value(key: &i64) -> String {
    format!("data_for_key_{key}")
}

/// Replay `trace` through a 2Q cache of `trace.capacity` entries
pub fn run_two_q(trace: &Trace) -> Result<PolicyReport, SimulationError> {
    let start = Instant::now();
    let mut cache = TwoQCache::init_with_hasher(
        TwoQCacheConfig {
            capacity: trace.capacity,
        },
        FnLoader(load_value),
        AHashRandomState::new(),
    )?;

    for &key in &trace.keys {
        cache.access(key);
    }
    let elapsed = start.elapsed();

    tracing::debug!(
        hits = cache.hits(),
        misses = cache.misses(),
        resident = cache.len(),
        ghosts = cache.ghost_len(),
        ?elapsed,
        "2Q replay finished"
    );

    Ok(PolicyReport {
        policy: Policy::TwoQ,
        capacity: trace.capacity,
        hits: cache.hits(),
        misses: cache.misses(),
        elapsed,
        metrics: cache.metrics(),
    })
}

/// Replay `trace` through the optimal cache of `trace.capacity` entries
pub fn run_optimal(trace: &Trace) -> Result<PolicyReport, SimulationError> {
    let start = Instant::now();
    let mut cache = OptimalCache::init_with_hasher(
        OptimalCacheConfig {
            capacity: trace.capacity,
        },
        trace.keys.clone(),
        AHashRandomState::new(),
    )?;
    cache.run();
    let elapsed = start.elapsed();

    Ok(PolicyReport {
        policy: Policy::Optimal,
        capacity: trace.capacity,
        hits: cache.hits(),
        misses: cache.misses(),
        elapsed,
        metrics: cache.metrics(),
    })
}

/// Replay one trace through a single policy
pub fn run_policy(trace: &Trace, policy: Policy) -> Result<PolicyReport, SimulationError> {
    match policy {
        Policy::TwoQ => run_two_q(trace),
        Policy::Optimal => run_optimal(trace),
    }
}

/// Replay one trace through every policy in `policies`
pub fn compare(trace: &Trace, policies: &[Policy]) -> Result<ComparisonResult, SimulationError> {
    tracing::info!(
        capacity = trace.capacity,
        requests = trace.len(),
        policies = policies.len(),
        "comparing policies"
    );

    let reports = policies
        .iter()
        .map(|&policy| run_policy(trace, policy))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ComparisonResult {
        capacity: trace.capacity,
        trace_len: trace.len(),
        unique_keys: trace.unique_keys(),
        reports,
    })
}

/// A reference trace with known hit counts for both engines
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Cache capacity
    pub capacity: usize,
    /// Requested keys in order
    pub keys: &'static [i64],
    /// Hits the 2Q engine must score
    pub expected_two_q: u64,
    /// Hits the optimal engine must score
    pub expected_optimal: u64,
}

impl Scenario {
    /// The scenario as a replayable trace
    pub fn trace(&self) -> Trace {
        Trace::new(self.capacity, self.keys.to_vec())
    }

    /// Expected hits for `policy`
    pub fn expected(&self, policy: Policy) -> u64 {
        match policy {
            Policy::TwoQ => self.expected_two_q,
            Policy::Optimal => self.expected_optimal,
        }
    }
}

/// Built-in reference scenarios
pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        capacity: 4,
        keys: &[1, 2, 3, 1, 4, 2, 5],
        expected_two_q: 0,
        expected_optimal: 2,
    },
    Scenario {
        capacity: 6,
        keys: &[1, 2, 3, 1, 2, 3, 4, 5, 6],
        expected_two_q: 3,
        expected_optimal: 3,
    },
    Scenario {
        capacity: 4,
        keys: &[1, 2, 1, 2, 1, 2, 1, 2],
        expected_two_q: 6,
        expected_optimal: 6,
    },
    Scenario {
        capacity: 6,
        keys: &[1, 2, 3, 4, 4, 5, 2, 3, 3, 7, 8, 9, 1, 2, 3],
        expected_two_q: 6,
        expected_optimal: 7,
    },
    Scenario {
        capacity: 8,
        keys: &[1, 2, 3, 4, 5, 6, 3, 5, 8, 9, 6, 10, 5, 3, 4, 2],
        expected_two_q: 6,
        expected_optimal: 7,
    },
];

/// Result of checking one scenario against one policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// 1-based scenario number
    pub number: usize,
    /// Policy that was checked
    pub policy: Policy,
    /// Hits the scenario requires
    pub expected: u64,
    /// Hits the engine scored
    pub actual: u64,
}

impl ScenarioOutcome {
    /// Whether the engine scored the expected hits
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// Run every built-in scenario through both policies
pub fn run_scenarios() -> Result<Vec<ScenarioOutcome>, SimulationError> {
    let mut outcomes = Vec::with_capacity(SCENARIOS.len() * 2);
    for (i, scenario) in SCENARIOS.iter().enumerate() {
        let trace = scenario.trace();
        for policy in Policy::all() {
            let report = run_policy(&trace, policy)?;
            let outcome = ScenarioOutcome {
                number: i + 1,
                policy,
                expected: scenario.expected(policy),
                actual: report.hits,
            };
            if !outcome.passed() {
                tracing::warn!(
                    scenario = outcome.number,
                    %policy,
                    expected = outcome.expected,
                    actual = outcome.actual,
                    "scenario hit count mismatch"
                );
            }
            outcomes.push(outcome);
        }
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_value_format() {
        assert_eq!(load_value(&42), "data_for_key_42");
        assert_eq!(load_value(&-3), "data_for_key_-3");
    }

    #[test]
    fn test_all_scenarios_pass() {
        let outcomes = run_scenarios().unwrap();
        assert_eq!(outcomes.len(), 10);
        for outcome in &outcomes {
            assert!(outcome.passed(), "{outcome:?}");
        }
    }

    #[test]
    fn test_compare_reports_both_policies() {
        let trace = Trace::new(4, vec![1, 2, 3, 1, 4, 2, 5]);
        let result = compare(&trace, &Policy::all()).unwrap();
        assert_eq!(result.trace_len, 7);
        assert_eq!(result.unique_keys, 5);
        assert_eq!(result.report(Policy::TwoQ).unwrap().hits, 0);
        assert_eq!(result.report(Policy::Optimal).unwrap().hits, 2);
        assert_eq!(result.report(Policy::Optimal).unwrap().misses, 5);
        assert_eq!(result.two_q_efficiency(), Some(0.0));
    }

    #[test]
    fn test_capacity_errors_surface() {
        let trace = Trace::new(1, vec![1, 1]);
        let err = run_two_q(&trace).unwrap_err();
        assert_eq!(
            err.to_string(),
            "2Q cache capacity must be at least 2, got 1"
        );
        assert_eq!(run_optimal(&trace).unwrap().hits, 1);

        let trace = Trace::new(0, vec![1]);
        assert!(matches!(
            run_optimal(&trace),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_empty_trace() {
        let trace = Trace::new(4, Vec::new());
        let report = run_two_q(&trace).unwrap();
        assert_eq!(report.requests(), 0);
        assert_eq!(report.hit_rate(), 0.0);
    }
}
