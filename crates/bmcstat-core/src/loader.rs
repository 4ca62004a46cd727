//! Locates result CSVs in the data directory and reads them into memory.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::{Result, StatsError};

/// A CSV table as read from disk: header row plus string cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| StatsError::parse(name, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        {
            let mut seen = HashSet::new();
            for h in &headers {
                if !seen.insert(h.as_str()) {
                    return Err(StatsError::parse(name, format!("duplicate column '{}'", h)));
                }
            }
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| StatsError::parse(name, e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }
}

/// Finds `<resource>.csv` in `data_dir`.
///
/// The canonical spelling is tried first; otherwise the resource name is
/// matched case-insensitively against the directory entries.
pub fn resolve(data_dir: &Path, resource: &str) -> Result<PathBuf> {
    let not_found = || StatsError::ResourceNotFound {
        resource: resource.to_string(),
        dir: data_dir.to_path_buf(),
    };

    let exact = data_dir.join(format!("{}.csv", resource));
    if exact.is_file() {
        return Ok(exact);
    }

    let wanted = format!("{}.csv", resource).to_ascii_lowercase();
    let entries = std::fs::read_dir(data_dir).map_err(|_| not_found())?;
    for entry in entries.flatten() {
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_ascii_lowercase() == wanted);
        if matches && path.is_file() {
            return Ok(path);
        }
    }
    Err(not_found())
}

pub fn load_table(data_dir: &Path, resource: &str) -> Result<RawTable> {
    let path = resolve(data_dir, resource)?;
    let file = File::open(&path).map_err(|e| {
        StatsError::parse(resource, format!("failed to open {}: {}", path.display(), e))
    })?;
    let table = RawTable::from_reader(resource, file)?;
    tracing::debug!(
        event = "table_loaded",
        table = %resource,
        path = %path.display(),
        rows = table.rows.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_headers_and_rows() {
        let csv = "job_name, result ,seahorn_total_time\na,TRUE,1.5\nb,,\n";
        let t = RawTable::from_reader("SEABMC_Z3", csv.as_bytes()).unwrap();
        assert_eq!(t.headers, vec!["job_name", "result", "seahorn_total_time"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1], vec!["b", "", ""]);
        assert_eq!(t.column_index("seahorn_total_time"), Some(2));
    }

    #[test]
    fn test_inconsistent_column_count_is_parse_error() {
        let csv = "job_name,result\na,TRUE,extra\n";
        let err = RawTable::from_reader("SEABMC_Z3", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StatsError::ParseError { .. }));
    }

    #[test]
    fn test_duplicate_header_is_parse_error() {
        let csv = "job_name,job_name\na,b\n";
        let err = RawTable::from_reader("t", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate column"));
    }

    #[test]
    fn test_resolve_missing_and_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ai4bmc_z3.csv"), "job_name\n").unwrap();

        let found = resolve(dir.path(), "AI4BMC_Z3").unwrap();
        assert!(found.ends_with("ai4bmc_z3.csv"));

        let err = resolve(dir.path(), "SEABMC_Z3").unwrap_err();
        assert!(matches!(err, StatsError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let bytes: &[u8] = b"job_name,result\n\xff\xfe,TRUE\n";
        let err = RawTable::from_reader("AI4BMC_Z3", bytes).unwrap_err();
        assert!(matches!(err, StatsError::ParseError { .. }));
    }
}
