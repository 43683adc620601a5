//! Field mapping entries and the analyze/finalize wire shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapping of one source header to a standard field.
///
/// Whether the user overrode the suggestion is always derived from the two
/// stored values, never stored itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Target field currently selected; empty means unmapped.
    pub current_value: String,
    /// Target field suggested by the analysis endpoint.
    pub original_suggestion: String,
}

impl FieldMapping {
    /// Creates a mapping whose current value equals the suggestion.
    pub fn from_suggestion(suggestion: impl Into<String>) -> Self {
        let suggestion = suggestion.into();
        Self {
            current_value: suggestion.clone(),
            original_suggestion: suggestion,
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.current_value != self.original_suggestion
    }

    pub fn is_mapped(&self) -> bool {
        !self.current_value.is_empty()
    }

    /// Restores the original suggestion.
    pub fn reset(&mut self) {
        self.current_value.clone_from(&self.original_suggestion);
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
}

/// Response of `POST /analyze`.
///
/// Suggestions are kept as raw JSON values: the backend occasionally returns
/// lists for combined fields, which the client treats as "no suggestion".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub mappings: Map<String, Value>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl AnalyzeResponse {
    /// Suggested target for `header`, or an empty string when none is usable.
    pub fn suggestion_for(&self, header: &str) -> String {
        match self.mappings.get(header) {
            Some(Value::String(target)) => target.clone(),
            _ => String::new(),
        }
    }
}

/// Body of `POST /finalize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub mappings: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn suggestion_falls_back_to_unmapped() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{
                "mappings": {"Name": "full_name", "Names": ["first_name", "last_name"]},
                "notes": []
            }"#,
        )
        .expect("decode analyze response");
        assert_eq!(response.suggestion_for("Name"), "full_name");
        assert_eq!(response.suggestion_for("Names"), "");
        assert_eq!(response.suggestion_for("Missing"), "");
    }

    #[test]
    fn analyze_request_omits_absent_rows() {
        let request = AnalyzeRequest {
            headers: vec!["Name".to_string()],
            rows: None,
        };
        let json = serde_json::to_value(&request).expect("encode request");
        assert!(json.get("rows").is_none());
    }

    proptest! {
        #[test]
        fn change_then_reset_restores_suggestion(suggestion in ".{0,12}", other in ".{0,12}") {
            let mut mapping = FieldMapping::from_suggestion(suggestion.clone());
            prop_assert!(!mapping.is_overridden());
            mapping.current_value = other.clone();
            prop_assert_eq!(mapping.is_overridden(), other != suggestion);
            mapping.reset();
            prop_assert_eq!(&mapping.current_value, &suggestion);
            prop_assert!(!mapping.is_overridden());
        }
    }
}
