//! Compliance risk levels and per-country entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-tier severity derived from the backend's free-text risk description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All levels, most severe first.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Sort priority; higher sorts first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Risk",
            Self::Medium => "Medium Risk",
            Self::Low => "Low Risk",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }

    /// Display color as a hex RGB string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "#ef4444",
            Self::Medium => "#f59e0b",
            Self::Low => "#10b981",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified heatmap entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRisk {
    pub country: String,
    pub risk_text: String,
    pub level: RiskLevel,
}

impl CountryRisk {
    pub fn priority(&self) -> u8 {
        self.level.priority()
    }
}

/// Response of `GET /compliance_heatmap`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceHeatmapResponse {
    pub compliance_heatmap: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_order_levels() {
        assert!(RiskLevel::High.priority() > RiskLevel::Medium.priority());
        assert!(RiskLevel::Medium.priority() > RiskLevel::Low.priority());
        assert_eq!(RiskLevel::ALL[0], RiskLevel::High);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(RiskLevel::Medium.to_string(), "Medium Risk");
    }
}
