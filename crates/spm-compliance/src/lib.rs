//! Compliance heatmap.
//!
//! Turns the backend's `{country: risk description}` map into classified,
//! ordered [`CountryRisk`](spm_model::CountryRisk) entries, then filters and
//! summarizes them for display.

#![deny(unsafe_code)]

pub mod classify;
pub mod filter;
pub mod view;

pub use classify::{build_heatmap, classify_risk};
pub use filter::{HeatmapStats, RiskFilter};
pub use view::{HeatmapState, HeatmapView};
