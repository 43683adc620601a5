//! Level filter and summary counts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spm_model::{CountryRisk, RiskLevel, SpmError};

/// Which risk levels to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl RiskFilter {
    pub fn level(self) -> Option<RiskLevel> {
        match self {
            Self::All => None,
            Self::High => Some(RiskLevel::High),
            Self::Medium => Some(RiskLevel::Medium),
            Self::Low => Some(RiskLevel::Low),
        }
    }

    pub fn matches(self, entry: &CountryRisk) -> bool {
        self.level().is_none_or(|level| entry.level == level)
    }

    /// Entries passing the filter, order preserved.
    pub fn apply(self, entries: &[CountryRisk]) -> Vec<&CountryRisk> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }

    pub fn label(self) -> &'static str {
        self.level().map_or("All", RiskLevel::label)
    }
}

impl fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskFilter {
    type Err = SpmError;

    /// Accepts `all`, `high`, `medium`, `low` or a level label such as
    /// `High Risk`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let key = normalized.strip_suffix(" risk").unwrap_or(&normalized);
        match key {
            "all" => Ok(Self::All),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(SpmError::validation(format!(
                "Unknown risk filter '{s}' (expected all, high, medium or low)"
            ))),
        }
    }
}

/// Counts per level over the full, unfiltered heatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeatmapStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl HeatmapStats {
    pub fn from_entries(entries: &[CountryRisk]) -> Self {
        entries
            .iter()
            .fold(Self::default(), |mut stats, entry| {
                stats.total += 1;
                match entry.level {
                    RiskLevel::High => stats.high += 1,
                    RiskLevel::Medium => stats.medium += 1,
                    RiskLevel::Low => stats.low += 1,
                }
                stats
            })
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }
}
