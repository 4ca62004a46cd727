//! Typed view over a [`RawTable`]: numeric coercion and canonical column names.

use crate::errors::{Result, StatsError};
use crate::loader::RawTable;
use crate::model::Pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Float,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    JobName,
    Result,
    ElapsedTime,
    SolveTime,
    CircuitSize,
    DagSize,
    PpCrabTime,
    PpCrabRangeTime,
    OpsemCrabTime,
    OpsemCrabRangeTime,
    PpSolved,
    PpUnsolved,
    OpsemSolved,
    OpsemUnsolved,
    PpLoc,
    OpsemLoc,
}

const BASELINE_COLUMNS: &[Column] = &[
    Column::JobName,
    Column::Result,
    Column::ElapsedTime,
    Column::SolveTime,
    Column::CircuitSize,
    Column::DagSize,
];

const AUGMENTED_COLUMNS: &[Column] = &[
    Column::JobName,
    Column::Result,
    Column::ElapsedTime,
    Column::SolveTime,
    Column::CircuitSize,
    Column::DagSize,
    Column::PpCrabTime,
    Column::PpCrabRangeTime,
    Column::OpsemCrabTime,
    Column::OpsemCrabRangeTime,
    Column::PpSolved,
    Column::PpUnsolved,
    Column::OpsemSolved,
    Column::OpsemUnsolved,
    Column::PpLoc,
    Column::OpsemLoc,
];

impl Column {
    /// Header used by the benchmark harness.
    pub fn source_name(&self) -> &'static str {
        match self {
            Column::JobName => "job_name",
            Column::Result => "result",
            Column::ElapsedTime => "seahorn_total_time",
            Column::SolveTime => "bmc_solve_time",
            Column::CircuitSize => "bmc_circuit_size",
            Column::DagSize => "bmc_dag_size",
            Column::PpCrabTime => "pp_crab_time",
            Column::PpCrabRangeTime => "pp_crab_range_time",
            Column::OpsemCrabTime => "opsem_crab_time",
            Column::OpsemCrabRangeTime => "opsem_crab_range_time",
            Column::PpSolved => "pp.isderef.solve",
            Column::PpUnsolved => "pp.isderef.not.solve",
            Column::OpsemSolved => "opsem.isderef.solve",
            Column::OpsemUnsolved => "opsem.isderef.not.solve",
            Column::PpLoc => "pp_loc",
            Column::OpsemLoc => "opsem_loc",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::JobName | Column::Result => ColumnKind::Text,
            Column::ElapsedTime
            | Column::SolveTime
            | Column::PpCrabTime
            | Column::PpCrabRangeTime
            | Column::OpsemCrabTime
            | Column::OpsemCrabRangeTime => ColumnKind::Float,
            Column::CircuitSize
            | Column::DagSize
            | Column::PpSolved
            | Column::PpUnsolved
            | Column::OpsemSolved
            | Column::OpsemUnsolved
            | Column::PpLoc
            | Column::OpsemLoc => ColumnKind::Integer,
        }
    }

    /// Output name of the column. Metrics measured by both pipelines get the
    /// pipeline label so they stay distinct after the join.
    pub fn canonical_name(&self, pipeline: Pipeline) -> String {
        let label = pipeline.label();
        match self {
            Column::ElapsedTime => label.to_string(),
            Column::SolveTime => format!("{}_solve_time", label),
            Column::CircuitSize => format!("{}_circuit_size", label),
            Column::DagSize => format!("{}_dag_size", label),
            other => other.source_name().to_string(),
        }
    }

    pub fn required_for(pipeline: Pipeline) -> &'static [Column] {
        match pipeline {
            Pipeline::Bmc => BASELINE_COLUMNS,
            Pipeline::Ai4Bmc => AUGMENTED_COLUMNS,
        }
    }
}

/// A row with typed cells. `None` marks an empty cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub job_name: String,
    pub result: Option<String>,
    pub elapsed: Option<f64>,
    pub solve_time: Option<f64>,
    pub circuit_size: Option<u64>,
    pub dag_size: Option<u64>,
    pub pp_crab_time: Option<f64>,
    pub pp_crab_range_time: Option<f64>,
    pub opsem_crab_time: Option<f64>,
    pub opsem_crab_range_time: Option<f64>,
    pub pp_solved: Option<u64>,
    pub pp_unsolved: Option<u64>,
    pub opsem_solved: Option<u64>,
    pub opsem_unsolved: Option<u64>,
    pub pp_loc: Option<u64>,
    pub opsem_loc: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub name: String,
    pub pipeline: Pipeline,
    pub rows: Vec<NormalizedRow>,
}

/// Cell values read as missing, the same set pandas treats as NA by default.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(v: &str) -> bool {
    v.is_empty() || v.eq_ignore_ascii_case("nan") || MISSING_TOKENS.contains(&v)
}

struct RowReader<'a> {
    table: &'a RawTable,
    row_idx: usize,
    cells: &'a [String],
}

impl RowReader<'_> {
    fn cell(&self, column: Column) -> Option<&str> {
        let idx = self.table.column_index(column.source_name())?;
        let v = self.cells.get(idx)?.trim();
        if is_missing(v) {
            None
        } else {
            Some(v)
        }
    }

    fn coercion_error(&self, column: Column, value: &str) -> StatsError {
        let expected = match column.kind() {
            ColumnKind::Float => "a number",
            ColumnKind::Integer => "a non-negative integer",
            ColumnKind::Text => "text",
        };
        StatsError::TypeCoercionError {
            table: self.table.name.clone(),
            // 1-based data row, header excluded
            row: self.row_idx + 1,
            column: column.source_name().to_string(),
            expected,
            value: value.to_string(),
        }
    }

    fn text(&self, column: Column) -> Option<String> {
        self.cell(column).map(str::to_string)
    }

    fn float(&self, column: Column) -> Result<Option<f64>> {
        match self.cell(column) {
            None => Ok(None),
            Some(v) => coerce_float(v)
                .map(Some)
                .ok_or_else(|| self.coercion_error(column, v)),
        }
    }

    fn integer(&self, column: Column) -> Result<Option<u64>> {
        match self.cell(column) {
            None => Ok(None),
            Some(v) => coerce_integer(v)
                .map(Some)
                .ok_or_else(|| self.coercion_error(column, v)),
        }
    }
}

fn coerce_float(v: &str) -> Option<f64> {
    v.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Accepts `12` as well as `12.0`; exporters write counts either way.
fn coerce_integer(v: &str) -> Option<u64> {
    if let Ok(n) = v.parse::<u64>() {
        return Some(n);
    }
    let f = v.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

pub fn normalize(raw: &RawTable, pipeline: Pipeline) -> Result<NormalizedTable> {
    let missing: Vec<&str> = Column::required_for(pipeline)
        .iter()
        .map(Column::source_name)
        .filter(|c| raw.column_index(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(StatsError::parse(
            &raw.name,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let mut rows = Vec::with_capacity(raw.rows.len());
    let mut names = std::collections::HashSet::new();
    for (row_idx, cells) in raw.rows.iter().enumerate() {
        let r = RowReader {
            table: raw,
            row_idx,
            cells,
        };
        let job_name = r.text(Column::JobName).ok_or_else(|| {
            StatsError::parse(&raw.name, format!("row {} has no job_name", row_idx + 1))
        })?;
        if !names.insert(job_name.clone()) {
            return Err(StatsError::parse(
                &raw.name,
                format!("duplicate case name '{}'", job_name),
            ));
        }

        rows.push(NormalizedRow {
            job_name,
            result: r.text(Column::Result),
            elapsed: r.float(Column::ElapsedTime)?,
            solve_time: r.float(Column::SolveTime)?,
            circuit_size: r.integer(Column::CircuitSize)?,
            dag_size: r.integer(Column::DagSize)?,
            pp_crab_time: r.float(Column::PpCrabTime)?,
            pp_crab_range_time: r.float(Column::PpCrabRangeTime)?,
            opsem_crab_time: r.float(Column::OpsemCrabTime)?,
            opsem_crab_range_time: r.float(Column::OpsemCrabRangeTime)?,
            pp_solved: r.integer(Column::PpSolved)?,
            pp_unsolved: r.integer(Column::PpUnsolved)?,
            opsem_solved: r.integer(Column::OpsemSolved)?,
            opsem_unsolved: r.integer(Column::OpsemUnsolved)?,
            pp_loc: r.integer(Column::PpLoc)?,
            opsem_loc: r.integer(Column::OpsemLoc)?,
        });
    }

    Ok(NormalizedTable {
        name: raw.name.clone(),
        pipeline,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(csv: &str) -> RawTable {
        RawTable::from_reader("SEABMC_Z3", csv.as_bytes()).unwrap()
    }

    const HEADER: &str =
        "job_name,result,seahorn_total_time,bmc_solve_time,bmc_circuit_size,bmc_dag_size";

    #[test]
    fn test_coerces_numeric_columns() {
        let t = raw(&format!("{HEADER}\nswap,TRUE,12.5,3.25,120,98.0\n"));
        let n = normalize(&t, Pipeline::Bmc).unwrap();
        let row = &n.rows[0];
        assert_eq!(row.job_name, "swap");
        assert_eq!(row.result.as_deref(), Some("TRUE"));
        assert_eq!(row.elapsed, Some(12.5));
        assert_eq!(row.solve_time, Some(3.25));
        assert_eq!(row.circuit_size, Some(120));
        assert_eq!(row.dag_size, Some(98));
        // absent optional columns stay empty
        assert_eq!(row.pp_solved, None);
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let t = raw(&format!("{HEADER}\nswap,,,,,\n"));
        let row = &normalize(&t, Pipeline::Bmc).unwrap().rows[0];
        assert_eq!(row.result, None);
        assert_eq!(row.elapsed, None);
        assert_eq!(row.dag_size, None);
    }

    #[test]
    fn test_non_numeric_cell_is_coercion_error() {
        let t = raw(&format!("{HEADER}\nswap,TRUE,fast,1,1,1\n"));
        let err = normalize(&t, Pipeline::Bmc).unwrap_err();
        match err {
            StatsError::TypeCoercionError { row, column, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "seahorn_total_time");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_integer_is_coercion_error() {
        let t = raw(&format!("{HEADER}\nswap,TRUE,1,1,1.5,1\n"));
        assert!(matches!(
            normalize(&t, Pipeline::Bmc),
            Err(StatsError::TypeCoercionError { .. })
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let t = raw("job_name,result\nswap,TRUE\n");
        let err = normalize(&t, Pipeline::Bmc).unwrap_err();
        assert!(err.to_string().contains("seahorn_total_time"));

        let t = raw(&format!("{HEADER}\nswap,TRUE,1,1,1,1\n"));
        let err = normalize(&t, Pipeline::Ai4Bmc).unwrap_err();
        assert!(err.to_string().contains("pp.isderef.solve"));
    }

    #[test]
    fn test_duplicate_case_name() {
        let t = raw(&format!("{HEADER}\nswap,TRUE,1,1,1,1\nswap,TRUE,2,1,1,1\n"));
        let err = normalize(&t, Pipeline::Bmc).unwrap_err();
        assert!(err.to_string().contains("duplicate case name"));
    }

    #[test]
    fn test_canonical_names_carry_pipeline_prefix() {
        assert_eq!(Column::ElapsedTime.canonical_name(Pipeline::Bmc), "BMC");
        assert_eq!(Column::ElapsedTime.canonical_name(Pipeline::Ai4Bmc), "AI4BMC");
        assert_eq!(
            Column::SolveTime.canonical_name(Pipeline::Ai4Bmc),
            "AI4BMC_solve_time"
        );
        assert_eq!(Column::PpLoc.canonical_name(Pipeline::Ai4Bmc), "pp_loc");
    }

    #[test]
    fn test_pandas_na_tokens_are_missing() {
        let t = raw(&format!("{HEADER}\nswap,NA,N/A,NULL,<NA>,nan\n"));
        let row = &normalize(&t, Pipeline::Bmc).unwrap().rows[0];
        assert_eq!(row.result, None);
        assert_eq!(row.elapsed, None);
        assert_eq!(row.solve_time, None);
        assert_eq!(row.circuit_size, None);
        assert_eq!(row.dag_size, None);
    }

    #[test]
    fn test_count_beyond_u64_is_coercion_error() {
        let t = raw(&format!("{HEADER}\nswap,TRUE,1,1,18446744073709551616,1\n"));
        assert!(matches!(
            normalize(&t, Pipeline::Bmc),
            Err(StatsError::TypeCoercionError { .. })
        ));
    }

    #[test]
    fn test_huge_check_counts_do_not_overflow() {
        let header = Column::required_for(Pipeline::Ai4Bmc)
            .iter()
            .map(Column::source_name)
            .collect::<Vec<_>>()
            .join(",");
        // pp.isderef.solve = u64::MAX, pp.isderef.not.solve = 1
        let csv = format!("{header}\nx,TRUE,1,1,1,1,0,0,0,0,18446744073709551615,1,0,0,1,1\n");
        let t = RawTable::from_reader("AI4BMC_Z3", csv.as_bytes()).unwrap();
        let normalized = normalize(&t, Pipeline::Ai4Bmc).unwrap();
        let table = crate::filter::impute_outcomes(normalized, 900.0);
        let m = crate::derive::derive_augmented(&table.records[0]);
        assert_eq!(m.pp.total, u64::MAX);
        let pct = m.pp.solved_pct.unwrap();
        assert!((0.0..=100.0).contains(&pct));
    }
}
