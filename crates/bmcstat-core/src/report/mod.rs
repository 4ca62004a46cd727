//! Builds the console report and writes the result artifacts.

pub mod console;
pub mod explain;
pub mod summary;
pub mod table;

use std::path::PathBuf;

use crate::buckets::{
    absint_time, performance, precision, AbsIntBuckets, BucketSummary, PerformanceBuckets,
    PrecisionBuckets, PrecisionSummary,
};
use crate::config::ReportConfig;
use crate::errors::{Result, StatsError};
use crate::join::ComparedCase;
use crate::pipeline::{process_solver, SolverRun};
use crate::plot::{comparison_series, scatter_total_times};
use crate::thresholds::*;

use console::{
    change_view, fmt_stat, Console, ABSINT_VIEW, EDGE_VIEW, HARD_VIEW, PRECISION_VIEW,
};
use summary::{SolverSummary, Summary};

const STATS_RULE_WIDTH: usize = 34;
const SECTION_RULE_WIDTH: usize = 45;

/// Outcome of a report run.
#[derive(Debug)]
pub struct Report {
    pub text: String,
    pub summary: Summary,
    /// Files actually written.
    pub artifacts: Vec<PathBuf>,
    /// Artifact failures that did not abort the run.
    pub warnings: Vec<StatsError>,
}

/// Runs every solver through the pipeline and renders the full report.
///
/// Loading, parsing and coercion failures abort with an error. Failing to
/// write the plot, the summary or the explanation file is logged, mentioned
/// in the text and collected in [`Report::warnings`].
pub fn run_report(cfg: &ReportConfig) -> Result<Report> {
    let mut out = Console::new(cfg.details);
    let mut artifacts = Vec::new();
    let mut warnings = Vec::new();

    out.title("STATISTICS", '=', STATS_RULE_WIDTH);
    out.blank();
    out.line(format!(
        "Note that the timeout threshold is {} seconds.",
        cfg.timeout_secs
    ));
    out.blank();
    if out.details() {
        out.line("Explanation of columns shown in the tables:");
        for l in explain::legend_lines() {
            out.line(l);
        }
        out.blank();
    }

    let mut runs = Vec::with_capacity(cfg.solvers.len());
    for (i, &solver) in cfg.solvers.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        out.line(format!("- With {solver}"));
        let run = process_solver(cfg, solver)?;
        render_run(&mut out, &run);
        runs.push(run);
    }

    let plot_path = cfg.plot_path();
    let series = comparison_series(&runs);
    match scatter_total_times(&plot_path, &series, cfg.timeout_secs) {
        Ok(()) => {
            out.line(format!("Please find the graph in {}.", plot_path.display()));
            artifacts.push(plot_path);
        }
        Err(e) => recover(&mut out, &mut warnings, "plot_failed", e)?,
    }

    let details: Vec<Vec<&ComparedCase>> = runs.iter().map(SolverRun::details).collect();
    let perf: Vec<PerformanceBuckets<'_>> = details.iter().map(|d| performance(d)).collect();
    let absint: Vec<AbsIntBuckets<'_>> = details.iter().map(|d| absint_time(d)).collect();

    out.blank();
    out.blank();
    out.title("PERFORMANCE: FASTER OR SLOWER?", '*', SECTION_RULE_WIDTH);
    for (i, (run, p)) in runs.iter().zip(&perf).enumerate() {
        if i > 0 {
            out.blank();
        }
        render_performance(&mut out, run, p);
    }

    out.blank();
    out.blank();
    out.title("PERFORMANCE: ABSINT Time in AI4BMC", '*', SECTION_RULE_WIDTH);
    for (i, (run, b)) in runs.iter().zip(&absint).enumerate() {
        if i > 0 {
            out.blank();
        }
        render_absint(&mut out, run, b);
    }

    // Precision only depends on the analysis, so the first solver stands in
    // for all of them.
    let prec = details.first().map(|d| precision(d));
    out.blank();
    out.blank();
    out.title("PRECISION: ABSINT Solving Rate", '*', SECTION_RULE_WIDTH);
    if let Some(p) = &prec {
        render_precision(&mut out, p);
    }
    if out.details() {
        let path = cfg.explanation_path();
        match explain::write_explanation(&path) {
            Ok(()) => {
                out.line(format!(
                    "Please find detailed explanation why these cases are hard to prove in {}.",
                    path.display()
                ));
                artifacts.push(path);
            }
            Err(e) => recover(&mut out, &mut warnings, "explanation_failed", e)?,
        }
    }
    out.blank();

    let mut summary = Summary::new(cfg.timeout_secs);
    for (i, run) in runs.iter().enumerate() {
        let buckets = BucketSummary::new(&perf[i], &absint[i]);
        let precision = if i == 0 {
            prec.as_ref().map(PrecisionSummary::from)
        } else {
            None
        };
        summary.solvers.push(SolverSummary::new(run, buckets, precision));
    }
    let summary_path = cfg.summary_path();
    match summary.save(&summary_path) {
        Ok(()) => {
            out.line(format!("Please find the summary in {}.", summary_path.display()));
            artifacts.push(summary_path);
        }
        Err(e) => recover(&mut out, &mut warnings, "summary_failed", e)?,
    }

    tracing::info!(
        event = "report_rendered",
        solvers = runs.len(),
        artifacts = artifacts.len(),
        warnings = warnings.len()
    );
    Ok(Report {
        text: out.into_string(),
        summary,
        artifacts,
        warnings,
    })
}

fn recover(
    out: &mut Console,
    warnings: &mut Vec<StatsError>,
    event: &'static str,
    err: StatsError,
) -> Result<()> {
    if !err.is_recoverable() {
        return Err(err);
    }
    tracing::warn!(event = event, error = %err);
    out.line(format!("-- Skipped: {err}"));
    warnings.push(err);
    Ok(())
}

fn render_run(out: &mut Console, run: &SolverRun) {
    for (pipeline, name) in &run.sources {
        out.line(format!(
            "-- Reading the result of {} from {}.csv",
            pipeline.label(),
            name
        ));
    }
    out.line(format!(
        "-- The number of cases with no dereference checks: {}. So excluding these cases.",
        run.excluded.len()
    ));
    out.line(format!("-- Total cases: {}", run.joined.len()));

    let t = &run.timeouts;
    out.line(format!(
        "-- The number of timeout cases for both pipelines is: {}",
        t.union.len()
    ));
    out.line(format!("\tcases: {:?}", t.union));
    if t.same {
        out.line("--- Both pipelines have the same timeout cases.");
    } else {
        out.line("--- Each pipeline may have different timeout cases.");
        out.line(format!("\tAI4BMC timeout cases: {:?}", t.only_augmented));
        out.line(format!("\tSEABMC timeout cases: {:?}", t.only_baseline));
    }
}

fn render_performance(out: &mut Console, run: &SolverRun, p: &PerformanceBuckets<'_>) {
    out.line(format!("- With {}, total cases: {}", run.solver, p.total));
    out.line(format!(
        "-- There are {} cases with no significant timing changes within {} seconds. So excluding these cases.",
        p.stable.len(),
        STABLE_BAND_SECS
    ));

    out.line(format!(
        "-- Speed up in total time (when total time difference > {}s):",
        STABLE_BAND_SECS
    ));
    out.line(format!("--- The number of cases speed up: {}", p.speedups.len()));
    out.table(&change_view("Speed up%"), &p.speedups);
    out.line(format!(
        "--- Speed up >{}% cases: {}",
        LARGE_SPEEDUP_PCT,
        p.large_speedups()
    ));
    out.line(format!("--- Speed up other cases: {}", p.other_speedups()));
    out.line(format!(
        "--- Overall, the average time spend on AbsInt time is {} seconds.",
        fmt_stat(p.speedup_absint().mean)
    ));

    out.line(format!(
        "-- Slowdowns in total time (when total time difference > {}s):",
        STABLE_BAND_SECS
    ));
    out.table(&change_view("Slow down%"), &p.slowdowns);
    out.line(format!(
        "--- Slow down <={}% cases: {}",
        -MILD_SLOWDOWN_PCT,
        p.mild_slowdowns()
    ));
    out.line(format!("--- Slow down other cases: {}", p.severe_slowdowns()));
}

fn render_absint(out: &mut Console, run: &SolverRun, b: &AbsIntBuckets<'_>) {
    out.line(format!("- With {}, total cases: {}", run.solver, b.total));
    out.line(format!(
        "-- How many cases that total time that BMC spent less than AI4BMC spent: {}",
        b.edge_cases.len()
    ));
    out.table(&EDGE_VIEW, &b.edge_cases);

    let groups = [
        (
            format!("AI% > {HEAVY_ABSINT_PCT}% when running time <= {FAST_RUN_SECS}s"),
            &b.fast_heavy,
            b.fast_heavy_stats(),
        ),
        (
            format!("AI% <= {HEAVY_ABSINT_PCT}% when running time <= {FAST_RUN_SECS}s"),
            &b.fast_light,
            b.fast_light_stats(),
        ),
        (
            format!("AI% <= {HEAVY_ABSINT_PCT}% when running time > {FAST_RUN_SECS}s"),
            &b.slow_light,
            b.slow_light_stats(),
        ),
    ];
    for (label, bucket, stats) in groups {
        out.line(format!("-- How many cases that {label}: {}", bucket.len()));
        out.line(format!(
            "--- For these cases, the average time for AbsInt is: {} seconds, and the maximum time for AbsInt is: {} seconds.",
            fmt_stat(stats.mean),
            fmt_stat(stats.max)
        ));
        out.table(&ABSINT_VIEW, bucket);
    }
    out.line(format!(
        "-- How many cases that AI% > {HEAVY_ABSINT_PCT}% when running time > {FAST_RUN_SECS}s: {}",
        b.slow_heavy.len()
    ));
}

fn render_precision(out: &mut Console, p: &PrecisionBuckets<'_>) {
    out.line("Precision does not depend on the solver used.");
    out.line(format!("Total cases: {}", p.total));

    out.line(format!(
        "- The number of cases that AbsInt solved >{MAJORITY_SOLVED_PCT}% checks before loop unrolling: {}",
        p.pre_majority.len()
    ));
    out.table(&PRECISION_VIEW, &p.pre_majority);
    out.line(format!(
        "-- with the number of cases solved {FULLY_SOLVED_PCT}%: {}",
        p.pre_full.len()
    ));
    out.table(&PRECISION_VIEW, &p.pre_full);

    out.line(format!(
        "- The number of cases that AbsInt solved >{MAJORITY_SOLVED_PCT}% checks after loop unrolling: {}",
        p.post_majority.len()
    ));
    out.table(&PRECISION_VIEW, &p.post_majority);
    out.line(format!(
        "-- with the number of cases solved {FULLY_SOLVED_PCT}%: {}",
        p.post_full.len()
    ));
    out.table(&PRECISION_VIEW, &p.post_full);

    out.line(format!(
        "- The number of cases that AbsInt hard to prove: {}",
        p.hard.len()
    ));
    out.table(&HARD_VIEW, &p.hard);
}
