use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filename used when the export response carries no `Content-Disposition`.
pub const DEFAULT_EXPORT_FILENAME: &str = "standardized_export.csv";

/// Body of `POST /export_standardized`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub rows: Vec<BTreeMap<String, String>>,
    pub mappings: BTreeMap<String, String>,
}

/// File returned by the export endpoint. The bytes are opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
