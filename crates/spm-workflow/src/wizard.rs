//! Linear wizard: upload, preview, map, success, with a policy side branch.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use spm_model::{Result, SpmError, UploadedDataset};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WizardStep {
    Upload,
    Preview,
    Map,
    Success,
    PolicySimulation,
}

impl WizardStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload CSV",
            Self::Preview => "Preview Data",
            Self::Map => "Map Fields",
            Self::Success => "Mappings Saved",
            Self::PolicySimulation => "Policy Simulation",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current step plus the data handed from one step to the next.
///
/// Every transition checks the current step; an invalid one returns a
/// validation error and changes nothing.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    dataset: Option<UploadedDataset>,
    mappings: Option<BTreeMap<String, String>>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Upload,
            dataset: None,
            mappings: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn dataset(&self) -> Option<&UploadedDataset> {
        self.dataset.as_ref()
    }

    /// Finalized mappings, present from the success step on.
    pub fn mappings(&self) -> Option<&BTreeMap<String, String>> {
        self.mappings.as_ref()
    }

    /// Upload → Preview.
    pub fn complete_upload(&mut self, dataset: UploadedDataset) -> Result<()> {
        self.require_step(WizardStep::Upload, "complete upload")?;
        self.dataset = Some(dataset);
        self.mappings = None;
        self.go(WizardStep::Preview);
        Ok(())
    }

    /// Preview → Map.
    pub fn confirm_preview(&mut self) -> Result<()> {
        self.require_step(WizardStep::Preview, "continue to mapping")?;
        self.go(WizardStep::Map);
        Ok(())
    }

    /// Map → Success, keeping the finalized mappings for export.
    ///
    /// Every uploaded header needs a non-empty target; otherwise the wizard
    /// stays on Map.
    pub fn complete_mapping(&mut self, mappings: BTreeMap<String, String>) -> Result<()> {
        self.require_step(WizardStep::Map, "complete mapping")?;
        let headers = self.dataset.as_ref().map_or(&[][..], |data| &data.headers[..]);
        let unmapped: Vec<&str> = headers
            .iter()
            .filter(|header| mappings.get(*header).is_none_or(|field| field.trim().is_empty()))
            .map(String::as_str)
            .collect();
        if headers.is_empty() || !unmapped.is_empty() {
            return Err(SpmError::validation(format!(
                "Every field must be mapped before continuing (unmapped: {})",
                unmapped.join(", ")
            )));
        }
        self.mappings = Some(mappings);
        self.go(WizardStep::Success);
        Ok(())
    }

    /// Success → PolicySimulation.
    pub fn open_policy_simulation(&mut self) -> Result<()> {
        self.require_step(WizardStep::Success, "open policy simulation")?;
        self.go(WizardStep::PolicySimulation);
        Ok(())
    }

    /// PolicySimulation → Success.
    pub fn back_to_summary(&mut self) -> Result<()> {
        self.require_step(WizardStep::PolicySimulation, "return to summary")?;
        self.go(WizardStep::Success);
        Ok(())
    }

    /// Success → Upload, dropping the previous file and mappings.
    pub fn restart(&mut self) -> Result<()> {
        self.require_step(WizardStep::Success, "map another file")?;
        self.dataset = None;
        self.mappings = None;
        self.go(WizardStep::Upload);
        Ok(())
    }

    fn require_step(&self, required: WizardStep, action: &str) -> Result<()> {
        if self.step == required {
            Ok(())
        } else {
            Err(SpmError::validation(format!(
                "Cannot {action} from step '{}'",
                self.step
            )))
        }
    }

    fn go(&mut self, next: WizardStep) {
        debug!(from = %self.step, to = %next, "wizard transition");
        self.step = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> UploadedDataset {
        UploadedDataset::new(vec!["Name".to_string()], vec![vec!["Ann".to_string()]])
    }

    #[test]
    fn happy_path_and_side_branch() {
        let mut wizard = Wizard::new();
        wizard.complete_upload(dataset()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Preview);
        wizard.confirm_preview().unwrap();
        wizard
            .complete_mapping(BTreeMap::from([(
                "Name".to_string(),
                "full_name".to_string(),
            )]))
            .unwrap();
        assert_eq!(wizard.step(), WizardStep::Success);

        wizard.open_policy_simulation().unwrap();
        wizard.back_to_summary().unwrap();
        assert!(wizard.mappings().is_some());

        wizard.restart().unwrap();
        assert_eq!(wizard.step(), WizardStep::Upload);
        assert!(wizard.dataset().is_none());
        assert!(wizard.mappings().is_none());
    }

    #[test]
    fn unmapped_columns_keep_wizard_on_map() {
        let mut wizard = Wizard::new();
        wizard
            .complete_upload(UploadedDataset::new(
                vec!["Name".to_string(), "Pay".to_string()],
                Vec::new(),
            ))
            .unwrap();
        wizard.confirm_preview().unwrap();

        let partial = BTreeMap::from([("Name".to_string(), String::new())]);
        let err = wizard.complete_mapping(partial).unwrap_err();
        assert!(matches!(err, SpmError::Validation(_)));
        assert!(err.to_string().contains("Name, Pay"));
        assert_eq!(wizard.step(), WizardStep::Map);
        assert!(wizard.mappings().is_none());

        assert!(wizard.complete_mapping(BTreeMap::new()).is_err());
        assert_eq!(wizard.step(), WizardStep::Map);

        let full = BTreeMap::from([
            ("Name".to_string(), "full_name".to_string()),
            ("Pay".to_string(), "base_salary".to_string()),
        ]);
        wizard.complete_mapping(full).unwrap();
        assert_eq!(wizard.step(), WizardStep::Success);
    }

    #[test]
    fn invalid_transition_leaves_step_unchanged() {
        let mut wizard = Wizard::new();
        assert!(matches!(
            wizard.confirm_preview(),
            Err(SpmError::Validation(_))
        ));
        assert!(wizard.complete_mapping(BTreeMap::new()).is_err());
        assert!(wizard.restart().is_err());
        assert_eq!(wizard.step(), WizardStep::Upload);

        wizard.complete_upload(dataset()).unwrap();
        assert!(wizard.open_policy_simulation().is_err());
        assert_eq!(wizard.step(), WizardStep::Preview);
    }
}
