//! Keyword classification of risk descriptions.

use std::collections::BTreeMap;

use spm_model::{CountryRisk, RiskLevel};

/// Classifies a free-text risk description.
///
/// Matching is case-insensitive and the first keyword found wins:
/// "high", then "moderate" or "medium", then "low". Anything else is Medium.
pub fn classify_risk(text: &str) -> RiskLevel {
    let lower = text.to_lowercase();
    if lower.contains("high") {
        RiskLevel::High
    } else if lower.contains("moderate") || lower.contains("medium") {
        RiskLevel::Medium
    } else if lower.contains("low") {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}

/// Classifies every entry and orders by priority (highest first), then by
/// country name.
pub fn build_heatmap(raw: &BTreeMap<String, String>) -> Vec<CountryRisk> {
    let mut entries: Vec<CountryRisk> = raw
        .iter()
        .map(|(country, text)| CountryRisk {
            country: country.clone(),
            risk_text: text.clone(),
            level: classify_risk(text),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then_with(|| a.country.cmp(&b.country))
    });
    entries
}
