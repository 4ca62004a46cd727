//! Pairs BMC and AI4BMC results per case and cross-checks their timeouts.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::derive::{percentage_change, AugmentedMetrics, BaselineMetrics};

/// One benchmark case as seen by both pipelines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedCase {
    pub job_name: String,
    pub baseline: BaselineMetrics,
    pub augmented: AugmentedMetrics,
}

impl ComparedCase {
    /// `BMC - AI4BMC`; positive when AI4BMC is faster.
    pub fn total_diff(&self) -> f64 {
        self.baseline.total_time - self.augmented.total_time
    }

    /// `BMC_solve_time - AI4BMC_solve_time`
    pub fn solve_diff(&self) -> f64 {
        self.baseline.solve_time - self.augmented.solve_time
    }

    /// Speedup (positive) or slowdown (negative) of AI4BMC relative to BMC.
    pub fn percentage_change(&self) -> Option<f64> {
        percentage_change(self.baseline.total_time, self.augmented.total_time)
    }

    pub fn timed_out(&self) -> bool {
        self.baseline.timed_out || self.augmented.timed_out
    }
}

/// Inner join on case name, in baseline order. Cases missing on either side
/// are dropped.
pub fn inner_join(
    baseline: &[BaselineMetrics],
    augmented: &[AugmentedMetrics],
) -> Vec<ComparedCase> {
    let by_name: HashMap<&str, &AugmentedMetrics> = augmented
        .iter()
        .map(|a| (a.job_name.as_str(), a))
        .collect();

    baseline
        .iter()
        .filter_map(|b| {
            by_name.get(b.job_name.as_str()).map(|a| ComparedCase {
                job_name: b.job_name.clone(),
                baseline: b.clone(),
                augmented: (*a).clone(),
            })
        })
        .collect()
}

/// Timeout sets of the two pipelines for one solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeoutCheck {
    pub same: bool,
    /// Sorted cases only AI4BMC timed out on.
    pub only_augmented: Vec<String>,
    /// Sorted cases only BMC timed out on.
    pub only_baseline: Vec<String>,
    /// Every case either pipeline timed out on; AI4BMC's first.
    pub union: Vec<String>,
}

impl TimeoutCheck {
    pub fn contains(&self, job_name: &str) -> bool {
        self.union.iter().any(|n| n == job_name)
    }
}

pub fn check_timeouts(augmented: &[String], baseline: &[String]) -> TimeoutCheck {
    let a: HashSet<&str> = augmented.iter().map(String::as_str).collect();
    let b: HashSet<&str> = baseline.iter().map(String::as_str).collect();

    let mut only_augmented: Vec<String> = augmented
        .iter()
        .filter(|n| !b.contains(n.as_str()))
        .cloned()
        .collect();
    let mut only_baseline: Vec<String> = baseline
        .iter()
        .filter(|n| !a.contains(n.as_str()))
        .cloned()
        .collect();
    only_augmented.sort();
    only_baseline.sort();

    let mut seen = HashSet::new();
    let union = augmented
        .iter()
        .chain(baseline.iter())
        .filter(|n| seen.insert(n.as_str()))
        .cloned()
        .collect();

    TimeoutCheck {
        same: a == b,
        only_augmented,
        only_baseline,
        union,
    }
}
