//! Reporting for trace simulation results

use std::path::Path;

use crate::error::SimulationError;
use crate::models::{ComparisonResult, CsvResultRow, Policy};

/// Formats and exports the outcome of a policy comparison
#[derive(Debug)]
pub struct SimulationStats<'a> {
    result: &'a ComparisonResult,
}

impl<'a> SimulationStats<'a> {
    /// Wrap a comparison for reporting
    pub fn new(result: &'a ComparisonResult) -> Self {
        Self { result }
    }

    /// Summary table as printed by `compare`
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Trace Simulation Summary\n");
        out.push_str("========================\n");
        out.push_str(&format!("Capacity: {} entries\n", self.result.capacity));
        out.push_str(&format!("Requests: {}\n", self.result.trace_len));
        out.push_str(&format!("Unique keys: {}\n\n", self.result.unique_keys));

        out.push_str(&format!(
            "{:<6} {:>10} {:>10} {:>9} {:>10} {:>12}\n",
            "Policy", "Hits", "Misses", "HitRate", "Evictions", "Time"
        ));
        out.push_str(&format!("{}\n", "-".repeat(62)));

        let mut reports: Vec<_> = self.result.reports.iter().collect();
        reports.sort_by_key(|r| r.policy);

        for report in reports {
            out.push_str(&format!(
                "{:<6} {:>10} {:>10} {:>8.2}% {:>10} {:>12.2?}\n",
                report.policy.as_str(),
                report.hits,
                report.misses,
                report.hit_rate(),
                report.metric("evictions") as u64,
                report.elapsed
            ));
        }

        if let Some(efficiency) = self.result.two_q_efficiency() {
            out.push_str(&format!(
                "\n{} reached {:.1}% of the {} hit count\n",
                Policy::TwoQ,
                efficiency,
                Policy::Optimal
            ));
        }
        out
    }

    /// Print a summary report of the comparison
    pub fn print_summary(&self) {
        print!("{}", self.summary());
    }

    /// Export one row per policy to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<(), SimulationError> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut reports: Vec<_> = self.result.reports.iter().collect();
        reports.sort_by_key(|r| r.policy);

        for report in reports {
            writer.serialize(CsvResultRow::from(report))?;
        }

        writer.flush()?;
        tracing::info!(path = %path.display(), "exported comparison CSV");
        Ok(())
    }
}
