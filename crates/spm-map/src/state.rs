//! Mapping state management for the interactive mapping step.
//!
//! Tracks one [`FieldMapping`] per source header, which of them the user has
//! overridden, and whether the mapping has been submitted.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use spm_model::{AnalyzeResponse, FieldMapping, Result, SpmError, is_standard_field};

/// How long the success banner stays visible after a submission.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(5);

/// Mapping of every uploaded header to a standard field.
///
/// Entries are keyed by header name, so duplicate headers share one entry.
#[derive(Debug, Clone)]
pub struct MappingState {
    /// Source headers in upload order.
    headers: Vec<String>,
    /// header -> mapping
    fields: BTreeMap<String, FieldMapping>,
    submitted_at: Option<Instant>,
}

impl MappingState {
    /// Builds the state from an analysis response, one entry per header.
    ///
    /// Headers without a usable suggestion start unmapped.
    pub fn from_analysis(headers: &[String], response: &AnalyzeResponse) -> Self {
        let fields = headers
            .iter()
            .map(|header| {
                (
                    header.clone(),
                    FieldMapping::from_suggestion(response.suggestion_for(header)),
                )
            })
            .collect();
        Self {
            headers: headers.to_vec(),
            fields,
            submitted_at: None,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn get(&self, header: &str) -> Option<&FieldMapping> {
        self.fields.get(header)
    }

    /// Number of distinct headers with an entry.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries in upload order, skipping repeated header names.
    pub fn entries(&self) -> Vec<(&str, &FieldMapping)> {
        let mut seen = std::collections::BTreeSet::new();
        self.headers
            .iter()
            .filter(|header| seen.insert(header.as_str()))
            .filter_map(|header| {
                self.fields
                    .get(header)
                    .map(|mapping| (header.as_str(), mapping))
            })
            .collect()
    }

    /// Sets the target field for `header`.
    pub fn set_value(&mut self, header: &str, value: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        let mapping = self.field_mut(header)?;
        mapping.current_value = value.into();
        Ok(())
    }

    /// Restores the suggested target for `header` only.
    pub fn reset(&mut self, header: &str) -> Result<()> {
        self.ensure_editable()?;
        self.field_mut(header)?.reset();
        Ok(())
    }

    /// True when there is at least one header and every header has a target.
    pub fn all_fields_mapped(&self) -> bool {
        !self.headers.is_empty()
            && self
                .headers
                .iter()
                .all(|header| self.fields.get(header).is_some_and(FieldMapping::is_mapped))
    }

    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.entries()
            .into_iter()
            .filter(|(_, mapping)| !mapping.is_mapped())
            .map(|(header, _)| header)
            .collect()
    }

    pub fn overridden_headers(&self) -> Vec<&str> {
        self.entries()
            .into_iter()
            .filter(|(_, mapping)| mapping.is_overridden())
            .map(|(header, _)| header)
            .collect()
    }

    /// Mapped targets that are not in the standard field catalog.
    pub fn unknown_targets(&self) -> Vec<(&str, &str)> {
        self.entries()
            .into_iter()
            .filter(|(_, mapping)| {
                mapping.is_mapped() && !is_standard_field(&mapping.current_value)
            })
            .map(|(header, mapping)| (header, mapping.current_value.as_str()))
            .collect()
    }

    /// Flattened `{header: current_value}` map sent on submission.
    pub fn to_submission(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(header, mapping)| (header.clone(), mapping.current_value.clone()))
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        let entries = self.entries();
        let mapped = entries.iter().filter(|(_, m)| m.is_mapped()).count();
        MappingSummary {
            total: entries.len(),
            mapped,
            unmapped: entries.len() - mapped,
            overridden: entries.iter().filter(|(_, m)| m.is_overridden()).count(),
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    pub fn submitted_at(&self) -> Option<Instant> {
        self.submitted_at
    }

    /// Marks the mapping as submitted. Further edits are rejected.
    pub fn mark_submitted(&mut self, at: Instant) {
        self.submitted_at = Some(at);
    }

    /// Whether the transient success banner is still showing at `now`.
    pub fn success_banner_visible(&self, now: Instant) -> bool {
        self.submitted_at
            .is_some_and(|at| now.saturating_duration_since(at) < SUCCESS_BANNER_DURATION)
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_submitted() {
            return Err(SpmError::validation(
                "Mappings have already been submitted and can no longer be edited",
            ));
        }
        Ok(())
    }

    fn field_mut(&mut self, header: &str) -> Result<&mut FieldMapping> {
        self.fields
            .get_mut(header)
            .ok_or_else(|| SpmError::validation(format!("Unknown field: {header}")))
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Distinct headers.
    pub total: usize,
    pub mapped: usize,
    pub unmapped: usize,
    /// Headers whose target differs from the suggestion.
    pub overridden: usize,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn response(value: serde_json::Value) -> AnalyzeResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn one_entry_per_header() {
        let state = MappingState::from_analysis(
            &headers(&["Name", "Pay", "City"]),
            &response(json!({"mappings": {"Name": "full_name", "Pay": "base_salary"}})),
        );
        assert_eq!(state.len(), 3);
        assert_eq!(state.get("City").unwrap().current_value, "");
        assert!(state.entries().iter().all(|(_, m)| !m.is_overridden()));
    }

    #[test]
    fn duplicate_headers_share_an_entry() {
        let state = MappingState::from_analysis(
            &headers(&["Pay", "Pay"]),
            &response(json!({"mappings": {"Pay": "base_salary"}})),
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.entries().len(), 1);
        assert!(state.all_fields_mapped());
    }

    #[test]
    fn submit_enabled_only_when_all_mapped() {
        let mut state = MappingState::from_analysis(
            &headers(&["Name", "Pay"]),
            &response(json!({"mappings": {"Name": "full_name", "Pay": ""}})),
        );
        assert!(!state.all_fields_mapped());
        assert_eq!(state.unmapped_headers(), vec!["Pay"]);

        state.set_value("Pay", "base_salary").unwrap();
        assert!(state.all_fields_mapped());
        assert_eq!(state.overridden_headers(), vec!["Pay"]);
    }

    #[test]
    fn reset_touches_one_field_only() {
        let mut state = MappingState::from_analysis(
            &headers(&["Name", "Pay"]),
            &response(json!({"mappings": {"Name": "full_name", "Pay": "base_salary"}})),
        );
        state.set_value("Name", "other").unwrap();
        state.set_value("Pay", "bonus").unwrap();
        state.reset("Name").unwrap();

        assert_eq!(state.get("Name").unwrap().current_value, "full_name");
        assert!(!state.get("Name").unwrap().is_overridden());
        assert_eq!(state.get("Pay").unwrap().current_value, "bonus");
        assert!(state.get("Pay").unwrap().is_overridden());
    }

    #[test]
    fn unknown_header_is_validation_error() {
        let mut state = MappingState::from_analysis(
            &headers(&["Name"]),
            &response(json!({"mappings": {}})),
        );
        let err = state.set_value("Salary", "base_salary").unwrap_err();
        assert!(matches!(err, SpmError::Validation(_)));
    }

    #[test]
    fn submitted_state_rejects_edits() {
        let mut state = MappingState::from_analysis(
            &headers(&["Name"]),
            &response(json!({"mappings": {"Name": "full_name"}})),
        );
        let at = Instant::now();
        state.mark_submitted(at);
        assert!(state.set_value("Name", "other").is_err());
        assert!(state.reset("Name").is_err());
        assert!(state.success_banner_visible(at + Duration::from_secs(4)));
        assert!(!state.success_banner_visible(at + SUCCESS_BANNER_DURATION));
    }

    #[test]
    fn summary_and_unknown_targets() {
        let mut state = MappingState::from_analysis(
            &headers(&["Name", "Pay", "Dept"]),
            &response(json!({"mappings": {"Name": "full_name", "Pay": "basic_salary"}})),
        );
        state.set_value("Name", "employee_id").unwrap();

        let summary = state.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.mapped, 2);
        assert_eq!(summary.unmapped, 1);
        assert_eq!(summary.overridden, 1);
        assert_eq!(state.unknown_targets(), vec![("Pay", "basic_salary")]);
    }

    #[test]
    fn empty_header_list_cannot_submit() {
        let state = MappingState::from_analysis(&[], &AnalyzeResponse::default());
        assert!(!state.all_fields_mapped());
    }
}
