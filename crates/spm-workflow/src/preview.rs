//! Local CSV preview, no network involved.

use std::path::Path;

use csv::ReaderBuilder;
use spm_model::{Result, SpmError, UploadedDataset};
use tracing::debug;

use crate::files::{io_error, validate_encoding};

/// First rows of a local CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Whether more records followed the ones shown.
    pub truncated: bool,
}

impl CsvPreview {
    pub fn into_dataset(self) -> UploadedDataset {
        UploadedDataset::new(self.headers, self.rows)
    }
}

/// Reads the header row and up to `limit` records of `path`.
///
/// Ragged rows are accepted as-is, matching what the backend tolerates.
pub fn read_preview(path: &Path, limit: usize) -> Result<CsvPreview> {
    validate_encoding(path)?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(SpmError::validation(format!(
            "No header row found in {}",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    let mut truncated = false;
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if rows.len() == limit {
            truncated = true;
            break;
        }
        rows.push(record.iter().map(ToString::to_string).collect());
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        truncated,
        "read local preview"
    );
    Ok(CsvPreview {
        headers,
        rows,
        truncated,
    })
}

fn csv_error(path: &Path, error: csv::Error) -> SpmError {
    if error.is_io_error() {
        match error.into_kind() {
            csv::ErrorKind::Io(source) => io_error(path, source),
            other => SpmError::validation(format!("{}: {other:?}", path.display())),
        }
    } else {
        SpmError::validation(format!("Invalid CSV in {}: {error}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn reads_headers_and_limits_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pay.csv");
        fs::write(&path, "\u{feff}Name,Pay\nAnn,100\nBob,200\nCy,300\n").unwrap();

        let preview = read_preview(&path, 2).unwrap();
        assert_eq!(preview.headers, vec!["Name", "Pay"]);
        assert_eq!(preview.rows.len(), 2);
        assert!(preview.truncated);

        let all = read_preview(&path, 10).unwrap();
        assert_eq!(all.rows.len(), 3);
        assert!(!all.truncated);
    }

    #[test]
    fn ragged_rows_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b\n1\n2,3,4\n").unwrap();

        let preview = read_preview(&path, 10).unwrap();
        assert_eq!(preview.rows[0], vec!["1"]);
        assert_eq!(preview.rows[1], vec!["2", "3", "4"]);
    }

    #[test]
    fn empty_file_has_no_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(matches!(read_preview(&path, 5), Err(SpmError::Validation(_))));
    }
}
