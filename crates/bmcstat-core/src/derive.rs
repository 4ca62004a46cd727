//! Per-case derived metrics.
//!
//! Every value that can be undefined (division by zero) is an `Option<f64>`;
//! nothing here ever produces NaN or infinity.

use serde::Serialize;

use crate::model::{CaseRecord, CheckCounts};

/// Metrics of the plain BMC run of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineMetrics {
    pub job_name: String,
    /// Total elapsed time (`BMC`).
    pub total_time: f64,
    pub solve_time: f64,
    pub circuit_size: u64,
    pub dag_size: u64,
    pub timed_out: bool,
}

/// Solved ratio of the dereference checks at one analysis stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageMetrics {
    pub checks: CheckCounts,
    /// `#pp` / `#opsem`
    pub total: u64,
    /// `pp solved%` / `opsem solved%`
    pub solved_pct: Option<f64>,
}

impl StageMetrics {
    pub fn from_counts(checks: CheckCounts) -> Self {
        Self {
            checks,
            total: checks.total(),
            solved_pct: percentage_solved(checks),
        }
    }
}

/// Metrics of the AI4BMC run of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentedMetrics {
    pub job_name: String,
    /// BMC time plus the analysis of the original program (`AI4BMC`).
    pub total_time: f64,
    pub solve_time: f64,
    pub circuit_size: u64,
    pub dag_size: u64,
    pub pp_loc: u64,
    pub opsem_loc: u64,
    /// All time spent in abstract interpretation (`AbsInt_time`).
    pub absint_time: f64,
    pub pp: StageMetrics,
    pub opsem: StageMetrics,
    /// Share of `total_time` spent in abstract interpretation (`AI%`).
    /// May exceed 100 because `absint_time` includes post-unrolling analysis.
    pub ai_pct: Option<f64>,
    pub timed_out: bool,
}

/// solved / (solved + unsolved) * 100, rounded half to even.
pub fn percentage_solved(checks: CheckCounts) -> Option<f64> {
    let total = checks.total();
    if total == 0 {
        return None;
    }
    Some((checks.solved as f64 / total as f64 * 100.0).round_ties_even())
}

pub fn ai_time_percentage(absint_time: f64, total_time: f64) -> Option<f64> {
    if total_time > 0.0 {
        Some(absint_time / total_time * 100.0)
    } else {
        None
    }
}

/// Relative change from `baseline` to `candidate`; positive means faster.
pub fn percentage_change(baseline: f64, candidate: f64) -> Option<f64> {
    if baseline != 0.0 {
        Some((baseline - candidate) / baseline * 100.0)
    } else {
        None
    }
}

pub fn derive_baseline(rec: &CaseRecord) -> BaselineMetrics {
    BaselineMetrics {
        job_name: rec.job_name.clone(),
        total_time: rec.elapsed,
        solve_time: rec.solve_time,
        circuit_size: rec.circuit_size,
        dag_size: rec.dag_size,
        timed_out: rec.timed_out(),
    }
}

pub fn derive_augmented(rec: &CaseRecord) -> AugmentedMetrics {
    // A timed-out run is pinned at the threshold; extra analysis time
    // must not push it past the plot bound.
    let total_time = if rec.timed_out() {
        rec.elapsed
    } else {
        rec.elapsed + rec.analysis.preprocessing()
    };
    let absint_time = rec.analysis.total();

    AugmentedMetrics {
        job_name: rec.job_name.clone(),
        total_time,
        solve_time: rec.solve_time,
        circuit_size: rec.circuit_size,
        dag_size: rec.dag_size,
        pp_loc: rec.pp_loc,
        opsem_loc: rec.opsem_loc,
        absint_time,
        pp: StageMetrics::from_counts(rec.pp_checks),
        opsem: StageMetrics::from_counts(rec.opsem_checks),
        ai_pct: ai_time_percentage(absint_time, total_time),
        timed_out: rec.timed_out(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisTimes, Outcome};

    fn record(elapsed: f64, analysis: AnalysisTimes) -> CaseRecord {
        CaseRecord {
            job_name: "array_list_swap".into(),
            outcome: Outcome::Completed("TRUE".into()),
            elapsed,
            solve_time: 1.0,
            circuit_size: 10,
            dag_size: 20,
            analysis,
            pp_checks: CheckCounts {
                solved: 8,
                unsolved: 2,
            },
            opsem_checks: CheckCounts::default(),
            pp_loc: 100,
            opsem_loc: 400,
        }
    }

    #[test]
    fn test_percentage_solved() {
        assert_eq!(
            percentage_solved(CheckCounts {
                solved: 8,
                unsolved: 2
            }),
            Some(80.0)
        );
        assert_eq!(
            percentage_solved(CheckCounts {
                solved: 1,
                unsolved: 2
            }),
            Some(33.0)
        );
        assert_eq!(
            percentage_solved(CheckCounts {
                solved: 1,
                unsolved: 7
            }),
            Some(12.0)
        );
        assert_eq!(percentage_solved(CheckCounts::default()), None);
    }

    #[test]
    fn test_percentage_solved_is_bounded() {
        for solved in 0..20u64 {
            for unsolved in 0..20u64 {
                let pct = percentage_solved(CheckCounts { solved, unsolved });
                match pct {
                    None => assert_eq!(solved + unsolved, 0),
                    Some(p) => assert!((0.0..=100.0).contains(&p)),
                }
            }
        }
    }

    #[test]
    fn test_augmented_total_and_share() {
        let rec = record(
            10.0,
            AnalysisTimes {
                pp: 1.0,
                pp_range: 1.0,
                opsem: 2.0,
                opsem_range: 4.0,
            },
        );
        let m = derive_augmented(&rec);
        assert_eq!(m.total_time, 12.0);
        assert_eq!(m.absint_time, 8.0);
        let pct = m.ai_pct.unwrap();
        assert!((pct - 66.666).abs() < 0.01);
        assert_eq!(m.pp.total, 10);
        assert_eq!(m.pp.solved_pct, Some(80.0));
        assert_eq!(m.opsem.total, 0);
        assert_eq!(m.opsem.solved_pct, None);
    }

    #[test]
    fn test_ai_share_undefined_for_zero_total() {
        let m = derive_augmented(&record(0.0, AnalysisTimes::default()));
        assert_eq!(m.total_time, 0.0);
        assert_eq!(m.ai_pct, None);
    }

    #[test]
    fn test_ai_share_may_exceed_hundred() {
        let rec = record(
            0.5,
            AnalysisTimes {
                pp: 0.1,
                pp_range: 0.0,
                opsem: 3.0,
                opsem_range: 0.0,
            },
        );
        let pct = derive_augmented(&rec).ai_pct.unwrap();
        assert!(pct > 100.0);
        assert!(pct.is_finite());
    }

    #[test]
    fn test_timed_out_total_is_pinned() {
        let mut rec = record(
            900.0,
            AnalysisTimes {
                pp: 5.0,
                ..Default::default()
            },
        );
        rec.outcome = Outcome::NoResult;
        let m = derive_augmented(&rec);
        assert_eq!(m.total_time, 900.0);
        assert!(m.timed_out);
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(percentage_change(10.0, 3.0), Some(70.0));
        assert_eq!(percentage_change(10.0, 20.0), Some(-100.0));
        assert_eq!(percentage_change(0.0, 20.0), None);
    }
}
