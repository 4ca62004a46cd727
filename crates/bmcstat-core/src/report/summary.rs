//! Machine-readable summary written next to the plot.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::buckets::{BucketSummary, PrecisionSummary};
use crate::errors::{Result, StatsError};
use crate::model::Solver;
use crate::pipeline::SolverRun;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub schema_version: u32,
    pub bmcstat_version: String,
    pub generated_at: DateTime<Utc>,
    pub timeout_secs: f64,
    pub solvers: Vec<SolverSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSummary {
    pub solver: String,
    /// Cases dropped for lacking dereference checks.
    pub excluded: usize,
    /// Size of the joined table, timeouts included.
    pub joined: usize,
    pub timeouts: Vec<String>,
    pub same_timeouts: bool,
    pub buckets: BucketSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<PrecisionSummary>,
}

impl SolverSummary {
    pub fn new(run: &SolverRun, buckets: BucketSummary, precision: Option<PrecisionSummary>) -> Self {
        Self {
            solver: run.solver.name().to_string(),
            excluded: run.excluded.len(),
            joined: run.joined.len(),
            timeouts: run.timeouts.union.clone(),
            same_timeouts: run.timeouts.same,
            buckets,
            precision,
        }
    }
}

impl Summary {
    pub fn new(timeout_secs: f64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            bmcstat_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            timeout_secs,
            solvers: Vec::new(),
        }
    }

    pub fn solver(&self, solver: Solver) -> Option<&SolverSummary> {
        self.solvers.iter().find(|s| s.solver == solver.name())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = path.display().to_string();
        let file = File::open(path).map_err(|e| StatsError::parse(&table, e.to_string()))?;
        let summary: Summary =
            serde_json::from_reader(file).map_err(|e| StatsError::parse(&table, e.to_string()))?;
        if summary.schema_version != SCHEMA_VERSION {
            return Err(StatsError::parse(
                table,
                format!("unsupported summary schema version {}", summary.schema_version),
            ));
        }
        Ok(summary)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StatsError::write(path, e))?;
        }
        let file = File::create(path).map_err(|e| StatsError::write(path, e))?;
        // pretty for diffability between runs
        serde_json::to_writer_pretty(file, self).map_err(|e| StatsError::write(path, e))?;
        tracing::info!(event = "summary_written", path = %path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_creates_result_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper_results").join("summary.json");
        let summary = Summary::new(900.0);
        summary.save(&path).unwrap();

        let loaded = Summary::load(&path).unwrap();
        assert_eq!(loaded.schema_version, SCHEMA_VERSION);
        assert_eq!(loaded.timeout_secs, 900.0);
        assert!(loaded.solver(Solver::Z3).is_none());
    }

    #[test]
    fn test_rejects_unknown_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let mut summary = Summary::new(900.0);
        summary.schema_version = 7;
        summary.save(&path).unwrap();

        let err = Summary::load(&path).unwrap_err();
        assert!(err.to_string().contains("schema version 7"));
    }
}
