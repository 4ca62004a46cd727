use serde::{Deserialize, Serialize};
use std::fmt;

/// Verification pipeline that produced a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pipeline {
    /// Plain bounded model checking.
    Bmc,
    /// Bounded model checking preceded by abstract interpretation.
    Ai4Bmc,
}

impl Pipeline {
    /// Prefix of the canonical column names, e.g. `BMC_solve_time`.
    pub fn label(&self) -> &'static str {
        match self {
            Pipeline::Bmc => "BMC",
            Pipeline::Ai4Bmc => "AI4BMC",
        }
    }

    /// Stem of the CSV file the pipeline writes its results to.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Pipeline::Bmc => "SEABMC",
            Pipeline::Ai4Bmc => "AI4BMC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Solver {
    Z3,
    Yices2,
}

impl Solver {
    pub fn name(&self) -> &'static str {
        match self {
            Solver::Z3 => "Z3",
            Solver::Yices2 => "Yices2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "z3" => Some(Solver::Z3),
            "yices2" | "y2" => Some(Solver::Yices2),
            _ => None,
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the result table for a pipeline/solver pair, e.g. `AI4BMC_Z3`.
pub fn resource_name(pipeline: Pipeline, solver: Solver) -> String {
    format!("{}_{}", pipeline.file_stem(), solver.name())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(String),
    /// No verdict and no elapsed time: the run hit the timeout.
    NoResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckCounts {
    pub solved: u64,
    pub unsolved: u64,
}

impl CheckCounts {
    /// Saturates instead of overflowing on absurd counts.
    pub fn total(&self) -> u64 {
        self.solved.saturating_add(self.unsolved)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Seconds spent in abstract interpretation, before (`pp`) and after
/// (`opsem`) loop unrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AnalysisTimes {
    pub pp: f64,
    pub pp_range: f64,
    pub opsem: f64,
    pub opsem_range: f64,
}

impl AnalysisTimes {
    /// Analysis done on the original program, paid before BMC starts.
    pub fn preprocessing(&self) -> f64 {
        self.pp + self.pp_range
    }

    pub fn total(&self) -> f64 {
        self.pp + self.pp_range + self.opsem + self.opsem_range
    }
}

/// One benchmark case after outcome imputation. All numbers are concrete.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub job_name: String,
    pub outcome: Outcome,
    pub elapsed: f64,
    pub solve_time: f64,
    pub circuit_size: u64,
    pub dag_size: u64,
    pub analysis: AnalysisTimes,
    pub pp_checks: CheckCounts,
    pub opsem_checks: CheckCounts,
    pub pp_loc: u64,
    pub opsem_loc: u64,
}

impl CaseRecord {
    pub fn timed_out(&self) -> bool {
        self.outcome == Outcome::NoResult
    }
}

/// All case records of one pipeline/solver table.
#[derive(Debug, Clone)]
pub struct PipelineTable {
    pub name: String,
    pub pipeline: Pipeline,
    pub records: Vec<CaseRecord>,
}

impl PipelineTable {
    /// Case names without a result, in table order.
    pub fn timed_out(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.timed_out())
            .map(|r| r.job_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names() {
        assert_eq!(resource_name(Pipeline::Ai4Bmc, Solver::Z3), "AI4BMC_Z3");
        assert_eq!(resource_name(Pipeline::Bmc, Solver::Yices2), "SEABMC_Yices2");
    }

    #[test]
    fn test_solver_parse_is_case_insensitive() {
        assert_eq!(Solver::parse("YICES2"), Some(Solver::Yices2));
        assert_eq!(Solver::parse("z3"), Some(Solver::Z3));
        assert_eq!(Solver::parse("cvc5"), None);
    }

    #[test]
    fn test_analysis_time_components() {
        let t = AnalysisTimes {
            pp: 1.0,
            pp_range: 2.0,
            opsem: 3.0,
            opsem_range: 4.0,
        };
        assert_eq!(t.preprocessing(), 3.0);
        assert_eq!(t.total(), 10.0);
    }
}
