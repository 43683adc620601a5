//! The export step.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use spm_client::{ApiClient, Transport};
use spm_model::{
    DEFAULT_EXPORT_FILENAME, ExportRequest, ExportedFile, Result, SpmError, UploadedDataset,
};
use tracing::{Instrument, info, info_span, warn};

use crate::files::io_error;

/// Requests the standardized file for a finalized mapping.
#[derive(Debug, Clone, Default)]
pub struct ExportStep {
    file: Option<ExportedFile>,
    error: Option<String>,
    loading: bool,
}

impl ExportStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&ExportedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Requests the export. Both the dataset and the finalized mappings are
    /// required.
    pub async fn export<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        dataset: Option<&UploadedDataset>,
        mappings: Option<&BTreeMap<String, String>>,
    ) -> Result<&ExportedFile> {
        let (Some(dataset), Some(mappings)) = (dataset, mappings) else {
            let error = SpmError::validation("No data or mappings available for export");
            self.error = Some(error.to_string());
            return Err(error);
        };

        let span = info_span!("export", rows = dataset.row_count());
        let start = Instant::now();
        let request = ExportRequest {
            rows: dataset.row_objects(),
            mappings: mappings.clone(),
        };

        self.loading = true;
        let outcome = client
            .export_standardized(&request)
            .instrument(span.clone())
            .await;
        self.loading = false;

        match outcome {
            Ok(file) => {
                let _entered = span.enter();
                info!(
                    filename = %file.filename,
                    bytes = file.bytes.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "export ready"
                );
                self.error = None;
                Ok(self.file.insert(file))
            }
            Err(error) => {
                warn!(%error, "export failed");
                self.file = None;
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }
}

/// Writes `file` into `dir` and returns the written path.
///
/// Only the final component of the server-provided name is used, so a name
/// like `../x.csv` still lands inside `dir`.
pub fn save_to(file: &ExportedFile, dir: &Path) -> Result<PathBuf> {
    let name = Path::new(&file.filename)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_EXPORT_FILENAME);
    let path = dir.join(name);
    std::fs::write(&path, &file.bytes).map_err(|e| io_error(&path, e))?;
    Ok(path)
}
