//! Fixtures shared by unit tests.

use crate::derive::{AugmentedMetrics, BaselineMetrics, StageMetrics};
use crate::join::ComparedCase;
use crate::model::CheckCounts;

pub fn names(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

pub fn baseline(name: &str, total: f64) -> BaselineMetrics {
    BaselineMetrics {
        job_name: name.into(),
        total_time: total,
        solve_time: total / 2.0,
        circuit_size: 0,
        dag_size: 0,
        timed_out: false,
    }
}

pub fn augmented(name: &str, total: f64) -> AugmentedMetrics {
    let stage = StageMetrics::from_counts(CheckCounts {
        solved: 1,
        unsolved: 1,
    });
    AugmentedMetrics {
        job_name: name.into(),
        total_time: total,
        solve_time: total / 4.0,
        circuit_size: 0,
        dag_size: 0,
        pp_loc: 0,
        opsem_loc: 0,
        absint_time: 0.0,
        pp: stage,
        opsem: stage,
        ai_pct: None,
        timed_out: false,
    }
}

pub fn case(name: &str, bmc: f64, ai4bmc: f64) -> ComparedCase {
    ComparedCase {
        job_name: name.into(),
        baseline: baseline(name, bmc),
        augmented: augmented(name, ai4bmc),
    }
}

/// Case with the given AbsInt time; `AI%` follows from the AI4BMC total.
pub fn case_with_absint(name: &str, bmc: f64, ai4bmc: f64, absint: f64) -> ComparedCase {
    let mut c = case(name, bmc, ai4bmc);
    c.augmented.absint_time = absint;
    c.augmented.ai_pct = crate::derive::ai_time_percentage(absint, ai4bmc);
    c
}

/// Case with the given solved counts before and after unrolling.
pub fn case_with_checks(name: &str, pp: (u64, u64), opsem: (u64, u64)) -> ComparedCase {
    let mut c = case(name, 10.0, 10.0);
    c.augmented.pp = StageMetrics::from_counts(CheckCounts {
        solved: pp.0,
        unsolved: pp.1,
    });
    c.augmented.opsem = StageMetrics::from_counts(CheckCounts {
        solved: opsem.0,
        unsolved: opsem.1,
    });
    c
}
