//! Outcome imputation and removal of cases without dereference checks.

use std::collections::BTreeSet;

use crate::model::{AnalysisTimes, CaseRecord, CheckCounts, Outcome, PipelineTable};
use crate::normalize::{NormalizedRow, NormalizedTable};

/// Verdict recorded for rows that carry a time but no explicit result.
const IMPLIED_RESULT: &str = "TRUE";

/// Resolves missing cells into concrete values.
///
/// A row that has an elapsed time finished even if its `result` cell is
/// empty. A row with neither is a timeout: its elapsed time becomes
/// `timeout_secs`. Every other missing number becomes zero.
pub fn impute_outcome(row: NormalizedRow, timeout_secs: f64) -> CaseRecord {
    let outcome = match (row.result, row.elapsed) {
        (Some(r), _) => Outcome::Completed(r),
        (None, Some(_)) => Outcome::Completed(IMPLIED_RESULT.to_string()),
        (None, None) => Outcome::NoResult,
    };
    let elapsed = match outcome {
        Outcome::NoResult => timeout_secs,
        Outcome::Completed(_) => row.elapsed.unwrap_or(0.0),
    };

    CaseRecord {
        job_name: row.job_name,
        outcome,
        elapsed,
        solve_time: row.solve_time.unwrap_or(0.0),
        circuit_size: row.circuit_size.unwrap_or(0),
        dag_size: row.dag_size.unwrap_or(0),
        analysis: AnalysisTimes {
            pp: row.pp_crab_time.unwrap_or(0.0),
            pp_range: row.pp_crab_range_time.unwrap_or(0.0),
            opsem: row.opsem_crab_time.unwrap_or(0.0),
            opsem_range: row.opsem_crab_range_time.unwrap_or(0.0),
        },
        pp_checks: CheckCounts {
            solved: row.pp_solved.unwrap_or(0),
            unsolved: row.pp_unsolved.unwrap_or(0),
        },
        opsem_checks: CheckCounts {
            solved: row.opsem_solved.unwrap_or(0),
            unsolved: row.opsem_unsolved.unwrap_or(0),
        },
        pp_loc: row.pp_loc.unwrap_or(0),
        opsem_loc: row.opsem_loc.unwrap_or(0),
    }
}

pub fn impute_outcomes(table: NormalizedTable, timeout_secs: f64) -> PipelineTable {
    PipelineTable {
        name: table.name,
        pipeline: table.pipeline,
        records: table
            .rows
            .into_iter()
            .map(|row| impute_outcome(row, timeout_secs))
            .collect(),
    }
}

/// Cases whose original program has no dereference checks at all.
///
/// Such cases cannot show any difference in precision and would skew the
/// solved percentages, so they are dropped from both sides of a comparison.
pub fn cases_without_checks(table: &PipelineTable) -> BTreeSet<String> {
    table
        .records
        .iter()
        .filter(|r| r.pp_checks.is_empty())
        .map(|r| r.job_name.clone())
        .collect()
}

/// Removes the named cases. Applying it twice with the same set is a no-op.
pub fn exclude_cases(table: PipelineTable, excluded: &BTreeSet<String>) -> PipelineTable {
    PipelineTable {
        records: table
            .records
            .into_iter()
            .filter(|r| !excluded.contains(&r.job_name))
            .collect(),
        ..table
    }
}
