//! Synthetic trace generation
//!
//! Produces traces with a configurable hot set and optional periodic scans,
//! the two access patterns that separate a scan-resistant policy from plain
//! recency. A seed makes the output reproducible.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SimulationError;
use crate::input::Trace;

/// Parameters for generating a synthetic trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Cache capacity written into the trace header
    pub capacity: usize,
    /// Number of requests to generate
    pub length: usize,
    /// Size of the regular key space `0..unique_keys`
    pub unique_keys: u32,
    /// Percentage of the key space that is hot
    pub hot_keys_percent: u8,
    /// Percentage of regular requests that go to hot keys
    pub hot_traffic_percent: u8,
    /// Insert a scan of `capacity` never-repeated keys after every this many
    /// regular requests; 0 disables scans
    pub scan_every: usize,
    /// RNG seed; a fresh random seed when `None`
    pub seed: Option<u64>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            length: 10_000,
            unique_keys: 1_000,
            hot_keys_percent: 20,
            hot_traffic_percent: 80,
            scan_every: 0,
            seed: None,
        }
    }
}

/// Generator for synthetic traces
#[derive(Debug)]
pub struct TraceGenerator {
    config: TraceConfig,
}

impl TraceGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Generate a trace according to the configuration
    pub fn generate(&self) -> Trace {
        let config = &self.config;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let unique = i64::from(config.unique_keys.max(1));
        let hot = (unique * i64::from(config.hot_keys_percent.min(100)) / 100).max(1);
        let hot_probability = f64::from(config.hot_traffic_percent.min(100)) / 100.0;

        tracing::info!(
            length = config.length,
            unique_keys = unique,
            hot_keys = hot,
            scan_every = config.scan_every,
            "generating trace"
        );

        // Scan keys start past the regular key space and never repeat.
        let mut next_scan_key = unique;
        let mut since_scan = 0;
        let mut keys = Vec::with_capacity(config.length);

        while keys.len() < config.length {
            if config.scan_every > 0 && since_scan == config.scan_every {
                let scan_len = config.capacity.max(1).min(config.length - keys.len());
                keys.extend(next_scan_key..next_scan_key + scan_len as i64);
                next_scan_key += scan_len as i64;
                since_scan = 0;
                continue;
            }

            let key = if hot == unique || rng.gen_bool(hot_probability) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(hot..unique)
            };
            keys.push(key);
            since_scan += 1;
        }

        Trace::new(config.capacity, keys)
    }

    /// Generate a trace and write it to `path` in trace text format
    pub fn write(&self, path: &Path) -> Result<Trace, SimulationError> {
        let trace = self.generate();
        let file = File::create(path)?;
        trace.write_to(BufWriter::new(file))?;
        tracing::info!(path = %path.display(), requests = trace.len(), "wrote trace");
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TraceReader;
    use std::collections::HashMap;
    use std::fs;

    fn seeded(config: TraceConfig) -> TraceConfig {
        TraceConfig {
            seed: Some(7),
            ..config
        }
    }

    #[test]
    fn test_default_config() {
        let config = TraceConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.length, 10_000);
        assert_eq!(config.unique_keys, 1_000);
        assert_eq!(config.hot_keys_percent, 20);
        assert_eq!(config.hot_traffic_percent, 80);
        assert_eq!(config.scan_every, 0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_length_and_key_range() {
        let trace = TraceGenerator::new(seeded(TraceConfig::default())).generate();
        assert_eq!(trace.len(), 10_000);
        assert_eq!(trace.capacity, 100);
        assert!(trace.keys.iter().all(|&k| (0..1_000).contains(&k)));
    }

    #[test]
    fn test_same_seed_same_trace() {
        let a = TraceGenerator::new(seeded(TraceConfig::default())).generate();
        let b = TraceGenerator::new(seeded(TraceConfig::default())).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hot_keys_receive_most_traffic() {
        let trace = TraceGenerator::new(seeded(TraceConfig::default())).generate();
        let hot = trace.keys.iter().filter(|&&k| k < 200).count();
        let share = hot as f64 / trace.len() as f64;
        assert!((0.75..0.85).contains(&share), "hot share was {share}");
    }

    #[test]
    fn test_scans_use_fresh_keys() {
        let config = seeded(TraceConfig {
            capacity: 10,
            length: 1_000,
            unique_keys: 50,
            scan_every: 100,
            ..TraceConfig::default()
        });
        let trace = TraceGenerator::new(config).generate();
        assert_eq!(trace.len(), 1_000);

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for &key in trace.keys.iter().filter(|&&k| k >= 50) {
            *counts.entry(key).or_default() += 1;
        }
        assert!(!counts.is_empty());
        assert!(counts.values().all(|&c| c == 1));
        // The first scan follows the first 100 regular requests.
        assert_eq!(&trace.keys[100..110], &(50..60).collect::<Vec<i64>>()[..]);
    }

    #[test]
    fn test_single_key_space() {
        let config = seeded(TraceConfig {
            unique_keys: 1,
            length: 20,
            ..TraceConfig::default()
        });
        let trace = TraceGenerator::new(config).generate();
        assert!(trace.keys.iter().all(|&k| k == 0));
    }

    #[test]
    fn test_write_round_trips_through_reader() {
        let dir = std::env::temp_dir().join("trace_simulator_generator_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("generated.txt");

        let config = seeded(TraceConfig {
            length: 333,
            ..TraceConfig::default()
        });
        let written = TraceGenerator::new(config).write(&path).unwrap();
        assert_eq!(TraceReader::read_file(&path).unwrap(), written);

        let _ = fs::remove_dir_all(&dir);
    }
}
