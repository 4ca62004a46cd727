use std::env;
use std::path::PathBuf;

use crate::model::Solver;

pub const DEFAULT_TIMEOUT_SECS: f64 = 900.0;

#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub result_dir: PathBuf,
    /// Elapsed time assigned to cases that never produced a result.
    pub timeout_secs: f64,
    pub solvers: Vec<Solver>,
    /// Print full tables, the column legend and the hard-case notes.
    pub details: bool,
    pub log_level: String,
    /// Names from `BMCSTAT_SOLVERS` that matched no solver. Left for the
    /// caller to report once logging is up.
    pub unknown_solvers: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("../res/vmcai/data"),
            result_dir: PathBuf::from("../res/vmcai/paper_results"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            solvers: vec![Solver::Z3, Solver::Yices2],
            details: false,
            log_level: "warn".to_string(),
            unknown_solvers: Vec::new(),
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("BMCSTAT_DATA_DIR") {
            cfg.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("BMCSTAT_RESULT_DIR") {
            cfg.result_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("BMCSTAT_TIMEOUT") {
            if let Ok(n) = v.parse::<f64>() {
                if n > 0.0 {
                    cfg.timeout_secs = n;
                }
            }
        }
        if let Ok(v) = env::var("BMCSTAT_SOLVERS") {
            let (solvers, unknown) = parse_solvers(&v);
            if !solvers.is_empty() {
                cfg.solvers = solvers;
            }
            cfg.unknown_solvers = unknown;
        }
        if let Ok(v) = env::var("BMCSTAT_LOG") {
            cfg.log_level = v;
        }
        cfg
    }

    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub fn plot_path(&self) -> PathBuf {
        self.result_dir.join("SP_case_study.png")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.result_dir.join("summary.json")
    }

    pub fn explanation_path(&self) -> PathBuf {
        self.result_dir.join("explanation.md")
    }
}

/// Comma-separated solver names. Duplicates are dropped; unknown names are
/// returned separately.
fn parse_solvers(list: &str) -> (Vec<Solver>, Vec<String>) {
    let mut solvers = Vec::new();
    let mut unknown = Vec::new();
    for s in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match Solver::parse(s) {
            Some(solver) if !solvers.contains(&solver) => solvers.push(solver),
            Some(_) => {}
            None => unknown.push(s.to_string()),
        }
    }
    (solvers, unknown)
}
