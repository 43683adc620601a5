//! The upload step.

use std::path::{Path, PathBuf};
use std::time::Instant;

use spm_client::{ApiClient, FilePart, Transport};
use spm_model::{Result, SpmError, UploadedDataset};
use tracing::{Instrument, info, info_span, warn};

use crate::files::{check_csv_file, io_error};

/// Holds the selected file and, once uploaded, the parsed dataset.
#[derive(Debug, Clone, Default)]
pub struct UploadStep {
    selected: Option<PathBuf>,
    dataset: Option<UploadedDataset>,
    error: Option<String>,
    loading: bool,
}

impl UploadStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, path: impl Into<PathBuf>) {
        self.selected = Some(path.into());
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn dataset(&self) -> Option<&UploadedDataset> {
        self.dataset.as_ref()
    }

    pub fn take_dataset(&mut self) -> Option<UploadedDataset> {
        self.dataset.take()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Uploads the selected file.
    ///
    /// The selection is cleared whatever the outcome, so the same file can
    /// be picked again. On failure no dataset is kept.
    pub async fn upload<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<&UploadedDataset> {
        self.dataset = None;
        let Some(path) = self.selected.take() else {
            let error = SpmError::validation("No file selected");
            self.error = Some(error.to_string());
            return Err(error);
        };

        self.loading = true;
        let outcome = upload_file(client, &path).await;
        self.loading = false;

        match outcome {
            Ok(dataset) => {
                self.error = None;
                Ok(self.dataset.insert(dataset))
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "upload failed");
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }
}

/// Checks `path` locally, then sends it to the upload endpoint.
pub async fn upload_file<T: Transport>(
    client: &ApiClient<T>,
    path: &Path,
) -> Result<UploadedDataset> {
    let span = info_span!("upload", path = %path.display());
    let start = Instant::now();

    let size = check_csv_file(path)?;
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    let filename = path
        .file_name()
        .map_or_else(|| "upload.csv".to_string(), |name| name.to_string_lossy().into_owned());

    let dataset = client
        .upload(FilePart::csv(filename, bytes))
        .instrument(span.clone())
        .await?;

    let _entered = span.enter();
    info!(
        bytes = size,
        columns = dataset.column_count(),
        rows = dataset.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "upload complete"
    );
    Ok(dataset)
}
