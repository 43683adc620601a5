//! The mapping step: analyze headers, let the user adjust, then finalize.

use std::collections::BTreeMap;
use std::time::Instant;

use spm_client::{ApiClient, Transport};
use spm_model::{AnalyzeRequest, FinalizeRequest, Result, SpmError, UploadedDataset};
use tracing::{Instrument, info, info_span, warn};

use crate::notes::AdvisoryNote;
use crate::state::MappingState;

/// Rows forwarded to the analysis endpoint as context.
pub const SAMPLE_ROW_LIMIT: usize = 5;

/// Drives one mapping session against the backend.
///
/// Failures are returned to the caller and also kept as a displayable
/// string in [`MappingStep::error`]; the step itself never panics.
#[derive(Debug, Clone, Default)]
pub struct MappingStep {
    headers: Vec<String>,
    sample_rows: Vec<Vec<String>>,
    state: Option<MappingState>,
    notes: Vec<AdvisoryNote>,
    error: Option<String>,
    loading: bool,
}

impl MappingStep {
    pub fn new(headers: Vec<String>, rows: &[Vec<String>]) -> Self {
        let mut step = Self::default();
        step.set_headers(headers, rows);
        step
    }

    pub fn from_dataset(dataset: &UploadedDataset) -> Self {
        Self::new(dataset.headers.clone(), &dataset.rows)
    }

    /// Replaces the input headers. A different header list discards the
    /// previous analysis.
    pub fn set_headers(&mut self, headers: Vec<String>, rows: &[Vec<String>]) {
        if headers != self.headers {
            self.state = None;
            self.notes.clear();
            self.error = None;
        }
        self.headers = headers;
        self.sample_rows = rows.iter().take(SAMPLE_ROW_LIMIT).cloned().collect();
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn state(&self) -> Option<&MappingState> {
        self.state.as_ref()
    }

    pub fn notes(&self) -> &[AdvisoryNote] {
        &self.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Requests suggestions for the current headers.
    ///
    /// On failure the mapping state stays unset and the error is recorded.
    pub async fn analyze<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        let span = info_span!("analyze", headers = self.headers.len());
        let start = Instant::now();
        let request = AnalyzeRequest {
            headers: self.headers.clone(),
            rows: (!self.sample_rows.is_empty()).then(|| self.sample_rows.clone()),
        };

        self.loading = true;
        let outcome = client.analyze(&request).instrument(span.clone()).await;
        self.loading = false;

        match outcome {
            Ok(response) => {
                let _entered = span.enter();
                let state = MappingState::from_analysis(&self.headers, &response);
                self.notes = response
                    .notes
                    .iter()
                    .map(|note| AdvisoryNote::new(note.as_str()))
                    .collect();
                info!(
                    fields = state.len(),
                    mapped = state.summary().mapped,
                    notes = self.notes.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "analysis complete"
                );
                self.state = Some(state);
                self.error = None;
                Ok(())
            }
            Err(error) => {
                warn!(%error, "analysis failed");
                self.state = None;
                self.notes.clear();
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Sets the target for `header`. A rejected edit is kept in
    /// [`MappingStep::error`]; an accepted one clears it.
    pub fn set_value(&mut self, header: &str, value: impl Into<String>) -> Result<()> {
        let outcome = self
            .state_mut()
            .and_then(|state| state.set_value(header, value));
        self.record(outcome)
    }

    pub fn reset(&mut self, header: &str) -> Result<()> {
        let outcome = self.state_mut().and_then(|state| state.reset(header));
        self.record(outcome)
    }

    /// Whether a submission would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.loading
            && self
                .state
                .as_ref()
                .is_some_and(|state| state.all_fields_mapped() && !state.is_submitted())
    }

    /// Sends the current mapping to the finalize endpoint.
    ///
    /// Returns the submitted `{header: field}` map. A failed submission
    /// leaves every field editable so the user can retry.
    pub async fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
    ) -> Result<BTreeMap<String, String>> {
        let span = info_span!("finalize");
        let start = Instant::now();

        let mappings = match self.submission() {
            Ok(mappings) => mappings,
            Err(error) => {
                self.error = Some(error.to_string());
                return Err(error);
            }
        };

        self.loading = true;
        let outcome = client
            .finalize(&FinalizeRequest {
                mappings: mappings.clone(),
            })
            .instrument(span.clone())
            .await;
        self.loading = false;

        match outcome {
            Ok(()) => {
                let _entered = span.enter();
                if let Some(state) = self.state.as_mut() {
                    state.mark_submitted(Instant::now());
                }
                self.error = None;
                info!(
                    fields = mappings.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "mappings submitted"
                );
                Ok(mappings)
            }
            Err(error) => {
                warn!(%error, "finalize failed");
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// The `{header: field}` map to send, if submission is allowed.
    fn submission(&self) -> Result<BTreeMap<String, String>> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| SpmError::validation("No mapping to submit; run analysis first"))?;
        if state.is_submitted() {
            return Err(SpmError::validation("Mappings have already been submitted"));
        }
        if !state.all_fields_mapped() {
            return Err(SpmError::validation(format!(
                "Every field must be mapped before submitting (unmapped: {})",
                state.unmapped_headers().join(", ")
            )));
        }
        Ok(state.to_submission())
    }

    fn record(&mut self, outcome: Result<()>) -> Result<()> {
        self.error = outcome.as_ref().err().map(ToString::to_string);
        outcome
    }

    fn state_mut(&mut self) -> Result<&mut MappingState> {
        self.state
            .as_mut()
            .ok_or_else(|| SpmError::validation("No mapping available; run analysis first"))
    }
}
