//! Error types for loading and reporting benchmark tables.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors raised while turning result CSVs into a report.
///
/// Everything except [`StatsError::WriteError`] aborts the run.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The CSV for a pipeline/solver pair does not exist.
    #[error("resource not found: {resource} (looked in {})", dir.display())]
    ResourceNotFound { resource: String, dir: PathBuf },

    /// The table could not be read as a consistent CSV.
    #[error("failed to parse table {table}: {message}")]
    ParseError { table: String, message: String },

    /// A numeric column holds a value that is not a number.
    #[error("table {table}, row {row}: column '{column}' expects {expected}, found '{value}'")]
    TypeCoercionError {
        table: String,
        row: usize,
        column: String,
        expected: &'static str,
        value: String,
    },

    /// An output artifact (plot, summary, explanation) could not be written.
    #[error("failed to write {}: {message}", path.display())]
    WriteError { path: PathBuf, message: String },
}

impl StatsError {
    pub fn parse(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn write(path: &Path, message: impl ToString) -> Self {
        Self::WriteError {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// True for failures that only affect a single output artifact.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StatsError::WriteError { .. })
    }
}
