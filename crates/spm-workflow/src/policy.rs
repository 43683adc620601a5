//! Policy simulation form and panel.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use spm_client::{ApiClient, Transport};
use spm_model::{
    PolicyChange, Result, SimulationRequest, SimulationResult, SpmError, UploadedDataset,
    find_country,
};
use tracing::{Instrument, info, info_span, warn};

/// Raw user input for a simulation. Fields hold what was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyForm {
    pub target_country: String,
    /// Blank means the target country's own currency.
    pub currency: String,
    /// Blank means no salary adjustment.
    pub salary: String,
    pub notes: String,
}

impl PolicyForm {
    /// Selects a country, pre-filling the currency when none was chosen.
    pub fn select_country(&mut self, code: &str) {
        self.target_country = code.trim().to_string();
        if self.currency.trim().is_empty()
            && let Some(country) = find_country(&self.target_country)
        {
            self.currency = country.currency.to_string();
        }
    }

    /// Validates the form and builds the request payload.
    pub fn to_policy_change(&self) -> Result<PolicyChange> {
        let target_country = self.target_country.trim();
        if target_country.is_empty() {
            return Err(SpmError::validation("Please select a target country"));
        }

        let new_currency = match self.currency.trim() {
            "" => find_country(target_country)
                .map(|country| country.currency.to_string())
                .ok_or_else(|| {
                    SpmError::validation(format!(
                        "No default currency for '{target_country}'; choose a currency"
                    ))
                })?,
            currency => currency.to_uppercase(),
        };

        let adjusted_salary = match self.salary.trim() {
            "" => None,
            raw => Some(parse_salary(raw)?),
        };

        Ok(PolicyChange {
            target_country: target_country.to_string(),
            new_currency,
            adjusted_salary,
            notes: self.notes.trim().to_string(),
        })
    }
}

fn parse_salary(raw: &str) -> Result<f64> {
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SpmError::validation(format!("Invalid salary amount: '{raw}'")))
}

/// Form plus the last simulation outcome.
#[derive(Debug, Clone, Default)]
pub struct PolicyPanel {
    pub form: PolicyForm,
    result: Option<SimulationResult>,
    error: Option<String>,
    loading: bool,
}

impl PolicyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Runs the simulation for `dataset` with the current form.
    ///
    /// A form problem is reported without sending anything.
    pub async fn simulate<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        dataset: &UploadedDataset,
    ) -> Result<&SimulationResult> {
        let policy_change = match self.form.to_policy_change() {
            Ok(change) => change,
            Err(error) => {
                self.error = Some(error.to_string());
                return Err(error);
            }
        };

        let span = info_span!(
            "simulate",
            country = %policy_change.target_country,
            currency = %policy_change.new_currency
        );
        let start = Instant::now();
        let request = SimulationRequest {
            headers: dataset.headers.clone(),
            rows: dataset.rows.clone(),
            policy_change,
        };

        self.loading = true;
        let outcome = client
            .simulate_policy_impact(&request)
            .instrument(span.clone())
            .await;
        self.loading = false;

        match outcome {
            Ok(result) => {
                let _entered = span.enter();
                info!(
                    notes = result.compliance_notes.len(),
                    recommendations = result.recommendations.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "simulation complete"
                );
                self.error = None;
                Ok(self.result.insert(result))
            }
            Err(error) => {
                warn!(%error, "simulation failed");
                self.result = None;
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Clears the form, result and error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
