//! Load → normalize → filter → derive → join, once per solver.

use std::collections::BTreeSet;

use crate::config::ReportConfig;
use crate::derive::{derive_augmented, derive_baseline};
use crate::errors::Result;
use crate::filter::{cases_without_checks, exclude_cases, impute_outcomes};
use crate::join::{check_timeouts, inner_join, ComparedCase, TimeoutCheck};
use crate::loader::load_table;
use crate::model::{resource_name, Pipeline, PipelineTable, Solver};
use crate::normalize::normalize;

/// Everything computed for one solver before bucketing.
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub solver: Solver,
    /// Resource names read, AI4BMC first.
    pub sources: Vec<(Pipeline, String)>,
    /// Cases dropped because their original program has no dereference checks.
    pub excluded: BTreeSet<String>,
    /// Joined comparison table, timeouts included.
    pub joined: Vec<ComparedCase>,
    pub timeouts: TimeoutCheck,
}

impl SolverRun {
    /// Joined cases that finished in both pipelines.
    pub fn details(&self) -> Vec<&ComparedCase> {
        self.joined
            .iter()
            .filter(|c| !self.timeouts.contains(&c.job_name))
            .collect()
    }
}

pub fn load_pipeline(
    cfg: &ReportConfig,
    pipeline: Pipeline,
    solver: Solver,
) -> Result<PipelineTable> {
    let resource = resource_name(pipeline, solver);
    let raw = load_table(&cfg.data_dir, &resource)?;
    let normalized = normalize(&raw, pipeline)?;
    Ok(impute_outcomes(normalized, cfg.timeout_secs))
}

pub fn process_solver(cfg: &ReportConfig, solver: Solver) -> Result<SolverRun> {
    let augmented = load_pipeline(cfg, Pipeline::Ai4Bmc, solver)?;
    let baseline = load_pipeline(cfg, Pipeline::Bmc, solver)?;
    let sources = vec![
        (Pipeline::Ai4Bmc, augmented.name.clone()),
        (Pipeline::Bmc, baseline.name.clone()),
    ];

    let timeouts = check_timeouts(&augmented.timed_out(), &baseline.timed_out());
    if !timeouts.same {
        tracing::warn!(
            event = "timeout_mismatch",
            solver = %solver,
            only_augmented = ?timeouts.only_augmented,
            only_baseline = ?timeouts.only_baseline
        );
    }

    let excluded = cases_without_checks(&augmented);
    tracing::info!(
        event = "cases_excluded",
        solver = %solver,
        reason = "no_dereference_checks",
        count = excluded.len()
    );
    let augmented = exclude_cases(augmented, &excluded);
    let baseline = exclude_cases(baseline, &excluded);

    let baseline_metrics: Vec<_> = baseline.records.iter().map(derive_baseline).collect();
    let augmented_metrics: Vec<_> = augmented.records.iter().map(derive_augmented).collect();
    let joined = inner_join(&baseline_metrics, &augmented_metrics);

    Ok(SolverRun {
        solver,
        sources,
        excluded,
        joined,
        timeouts,
    })
}
