//! Local file checks performed before any upload.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use spm_model::{Result, SpmError};

/// Largest file the backend accepts (10 MiB).
pub const MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// Checks that `path` is an existing, non-empty `.csv` file within the
/// upload size limit. Returns the file size.
pub fn check_csv_file(path: &Path) -> Result<u64> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(SpmError::validation(format!(
            "Only CSV files are supported: {}",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path).map_err(|e| not_found_or_io(path, e))?;
    if !metadata.is_file() {
        return Err(SpmError::validation(format!(
            "Not a file: {}",
            path.display()
        )));
    }
    if metadata.len() == 0 {
        return Err(SpmError::validation(format!(
            "File is empty: {}",
            path.display()
        )));
    }
    if metadata.len() > MAX_UPLOAD_SIZE {
        return Err(SpmError::validation(format!(
            "File too large: {} is {} bytes (max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_UPLOAD_SIZE
        )));
    }
    Ok(metadata.len())
}

/// Rejects UTF-16 encoded files. A UTF-8 BOM is fine.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| not_found_or_io(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| io_error(path, e))?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(SpmError::validation(format!(
                "Unsupported encoding {encoding} in {}; save the file as UTF-8",
                path.display()
            )));
        }
    }
    Ok(())
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> SpmError {
    SpmError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn not_found_or_io(path: &Path, source: std::io::Error) -> SpmError {
    if source.kind() == std::io::ErrorKind::NotFound {
        SpmError::validation(format!("File not found: {}", path.display()))
    } else {
        io_error(path, source)
    }
}
