use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parsed CSV content returned by the upload endpoint.
///
/// Rows are positional and aligned to `headers` by index. Header uniqueness
/// is not enforced here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl UploadedDataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// First `limit` rows, or all of them when fewer exist.
    pub fn sample(&self, limit: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(limit)]
    }

    /// Converts the row-major table into one `{header: cell}` object per row.
    ///
    /// Short rows are filled with empty strings; cells beyond the last header
    /// are dropped. With duplicate headers the rightmost cell wins.
    pub fn row_objects(&self) -> Vec<BTreeMap<String, String>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .enumerate()
                    .map(|(index, header)| {
                        let cell = row.get(index).cloned().unwrap_or_default();
                        (header.clone(), cell)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(headers: &[&str], rows: &[&[&str]]) -> UploadedDataset {
        UploadedDataset::new(
            headers.iter().map(ToString::to_string).collect(),
            rows.iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        )
    }

    #[test]
    fn row_objects_fill_short_rows() {
        let data = dataset(&["a", "b"], &[&["1", "2"], &["3"]]);
        let objects = data.row_objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0]["a"], "1");
        assert_eq!(objects[0]["b"], "2");
        assert_eq!(objects[1]["a"], "3");
        assert_eq!(objects[1]["b"], "");
    }

    #[test]
    fn row_objects_drop_surplus_cells() {
        let data = dataset(&["a"], &[&["1", "extra"]]);
        let objects = data.row_objects();
        assert_eq!(objects[0].len(), 1);
        assert_eq!(objects[0]["a"], "1");
    }

    #[test]
    fn sample_is_bounded() {
        let data = dataset(&["a"], &[&["1"], &["2"], &["3"]]);
        assert_eq!(data.sample(2).len(), 2);
        assert_eq!(data.sample(10).len(), 3);
        assert!(UploadedDataset::default().sample(5).is_empty());
    }

    #[test]
    fn decoding_requires_both_arrays() {
        let missing_rows = serde_json::from_str::<UploadedDataset>(r#"{"headers": ["a"]}"#);
        assert!(missing_rows.is_err());
        let rows_not_array =
            serde_json::from_str::<UploadedDataset>(r#"{"headers": ["a"], "rows": "x"}"#);
        assert!(rows_not_array.is_err());
    }
}
