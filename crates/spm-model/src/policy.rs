//! Policy simulation request/response shapes and the target country table.

use serde::{Deserialize, Serialize};

/// A country selectable as simulation target, with its canonical currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country {
        code: "US",
        name: "United States",
        currency: "USD",
    },
    Country {
        code: "UK",
        name: "United Kingdom",
        currency: "GBP",
    },
    Country {
        code: "DE",
        name: "Germany",
        currency: "EUR",
    },
    Country {
        code: "FR",
        name: "France",
        currency: "EUR",
    },
    Country {
        code: "JP",
        name: "Japan",
        currency: "JPY",
    },
    Country {
        code: "CA",
        name: "Canada",
        currency: "CAD",
    },
    Country {
        code: "AU",
        name: "Australia",
        currency: "AUD",
    },
    Country {
        code: "SG",
        name: "Singapore",
        currency: "SGD",
    },
    Country {
        code: "CH",
        name: "Switzerland",
        currency: "CHF",
    },
    Country {
        code: "NL",
        name: "Netherlands",
        currency: "EUR",
    },
];

/// Currencies offered as overrides.
pub const CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "SGD", "CHF", "SEK", "NOK",
];

/// Looks up a country by code, ignoring ASCII case.
pub fn find_country(code: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(code))
}

/// The policy parameters sent to the simulation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyChange {
    pub target_country: String,
    pub new_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_salary: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// Body of `POST /simulate_policy_impact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub policy_change: PolicyChange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub estimated_change: String,
    pub currency_impact: String,
    pub tax_implications: String,
}

/// Narrative impact report returned by the simulation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub impact_summary: String,
    pub cost_analysis: CostAnalysis,
    #[serde(default)]
    pub compliance_notes: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl SimulationResult {
    /// The three cost-impact rows in display order.
    pub fn cost_rows(&self) -> [(&'static str, &str); 3] {
        [
            ("Estimated Change", self.cost_analysis.estimated_change.as_str()),
            ("Currency Impact", self.cost_analysis.currency_impact.as_str()),
            ("Tax Implications", self.cost_analysis.tax_implications.as_str()),
        ]
    }
}
