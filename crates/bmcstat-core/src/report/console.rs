//! Plain-text rendering of the report.

use std::fmt;

use super::table::{Cell, Table};
use crate::join::ComparedCase;
use crate::model::Pipeline;
use crate::normalize::Column;

pub const TABLE_RULE_WIDTH: usize = 34;

/// A report column over a compared case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Col {
    JobName,
    /// Percentage change, under the given header.
    Change(&'static str),
    Bmc,
    Ai4Bmc,
    TotalDiff,
    BmcSolveTime,
    Ai4BmcSolveTime,
    SolveDiff,
    AbsIntTime,
    AiPct,
    PreSolved,
    PreChecks,
    PostSolved,
    PostChecks,
}

impl Col {
    /// Measured columns use the normalizer's pipeline-prefixed names.
    pub fn header(&self) -> String {
        match self {
            Col::Bmc => Column::ElapsedTime.canonical_name(Pipeline::Bmc),
            Col::Ai4Bmc => Column::ElapsedTime.canonical_name(Pipeline::Ai4Bmc),
            Col::BmcSolveTime => Column::SolveTime.canonical_name(Pipeline::Bmc),
            Col::Ai4BmcSolveTime => Column::SolveTime.canonical_name(Pipeline::Ai4Bmc),
            Col::JobName => Column::JobName.source_name().to_string(),
            Col::Change(h) => h.to_string(),
            Col::TotalDiff => "total_diff".to_string(),
            Col::SolveDiff => "solve_diff".to_string(),
            Col::AbsIntTime => "AbsInt_time".to_string(),
            Col::AiPct => "AI%".to_string(),
            Col::PreSolved => "pp solved%".to_string(),
            Col::PreChecks => "#pp".to_string(),
            Col::PostSolved => "opsem solved%".to_string(),
            Col::PostChecks => "#opsem".to_string(),
        }
    }

    pub fn cell(&self, c: &ComparedCase) -> Cell {
        match self {
            Col::JobName => c.job_name.as_str().into(),
            Col::Change(_) => c.percentage_change().into(),
            Col::Bmc => c.baseline.total_time.into(),
            Col::Ai4Bmc => c.augmented.total_time.into(),
            Col::TotalDiff => c.total_diff().into(),
            Col::BmcSolveTime => c.baseline.solve_time.into(),
            Col::Ai4BmcSolveTime => c.augmented.solve_time.into(),
            Col::SolveDiff => c.solve_diff().into(),
            Col::AbsIntTime => c.augmented.absint_time.into(),
            Col::AiPct => c.augmented.ai_pct.into(),
            Col::PreSolved => c.augmented.pp.solved_pct.into(),
            Col::PreChecks => c.augmented.pp.total.into(),
            Col::PostSolved => c.augmented.opsem.solved_pct.into(),
            Col::PostChecks => c.augmented.opsem.total.into(),
        }
    }
}

pub fn change_view(header: &'static str) -> [Col; 12] {
    [
        Col::JobName,
        Col::Change(header),
        Col::Bmc,
        Col::Ai4Bmc,
        Col::TotalDiff,
        Col::BmcSolveTime,
        Col::Ai4BmcSolveTime,
        Col::SolveDiff,
        Col::AbsIntTime,
        Col::AiPct,
        Col::PreSolved,
        Col::PostSolved,
    ]
}

pub const ABSINT_VIEW: [Col; 8] = [
    Col::JobName,
    Col::Ai4Bmc,
    Col::AbsIntTime,
    Col::AiPct,
    Col::PreSolved,
    Col::PreChecks,
    Col::PostSolved,
    Col::PostChecks,
];

pub const EDGE_VIEW: [Col; 6] = [
    Col::JobName,
    Col::Bmc,
    Col::Ai4Bmc,
    Col::TotalDiff,
    Col::AbsIntTime,
    Col::AiPct,
];

pub const PRECISION_VIEW: [Col; 8] = [
    Col::JobName,
    Col::PreChecks,
    Col::PreSolved,
    Col::PostChecks,
    Col::PostSolved,
    Col::Ai4Bmc,
    Col::AiPct,
    Col::TotalDiff,
];

pub const HARD_VIEW: [Col; 9] = [
    Col::JobName,
    Col::PreChecks,
    Col::PreSolved,
    Col::PostChecks,
    Col::PostSolved,
    Col::Bmc,
    Col::Ai4Bmc,
    Col::AiPct,
    Col::TotalDiff,
];

pub fn build_table(cols: &[Col], cases: &[&ComparedCase]) -> Table {
    let headers: Vec<String> = cols.iter().map(Col::header).collect();
    let mut table = Table::new(&headers);
    for c in cases {
        table.push_row(cols.iter().map(|col| col.cell(c)).collect());
    }
    table
}

/// `title` centered between two rules of `rule` characters.
pub fn centered_title(title: &str, rule: char, width: usize) -> String {
    let padding = " ".repeat(width.saturating_sub(title.chars().count()) / 2);
    let line: String = std::iter::repeat(rule).take(width).collect();
    format!("{line}\n{padding}{title}{padding}\n{line}")
}

/// Two decimals, or `nan` for an undefined statistic.
pub fn fmt_stat(v: Option<f64>) -> String {
    Cell::Float(v).to_string()
}

/// Accumulates report text. Tables are only emitted in details mode.
#[derive(Debug, Default)]
pub struct Console {
    buf: String,
    details: bool,
}

impl Console {
    pub fn new(details: bool) -> Self {
        Self {
            buf: String::new(),
            details,
        }
    }

    pub fn details(&self) -> bool {
        self.details
    }

    pub fn line(&mut self, text: impl fmt::Display) {
        self.buf.push_str(&text.to_string());
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn title(&mut self, title: &str, rule: char, width: usize) {
        self.line(centered_title(title, rule, width));
    }

    pub fn table(&mut self, cols: &[Col], cases: &[&ComparedCase]) {
        if !self.details {
            return;
        }
        let rule = "-".repeat(TABLE_RULE_WIDTH);
        let table = build_table(cols, cases);
        self.line(&rule);
        // Table's Display ends every row with a newline already.
        self.buf.push_str(&table.to_string());
        self.line(&rule);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
