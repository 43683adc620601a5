//! `Content-Disposition` filename extraction for downloaded exports.

use spm_model::DEFAULT_EXPORT_FILENAME;

/// Returns the suggested filename from a `Content-Disposition` header value.
///
/// Takes the text after `filename=` up to the next `;`, with quotes
/// removed. Falls back to [`DEFAULT_EXPORT_FILENAME`] when the header is
/// missing or carries no usable name.
pub fn filename_from_content_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split_once("filename="))
        .map(|(_, rest)| {
            rest.split(';')
                .next()
                .unwrap_or_default()
                .replace('"', "")
                .trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
}
