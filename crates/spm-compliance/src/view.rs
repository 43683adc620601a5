//! Fetch-and-display state for the heatmap.

use std::time::Instant;

use spm_client::{ApiClient, Transport};
use spm_model::{CountryRisk, Result};
use tracing::{Instrument, info, info_span, warn};

use crate::classify::build_heatmap;
use crate::filter::{HeatmapStats, RiskFilter};

/// Exactly one state at any time. A new view is `Idle` until its first fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeatmapState {
    Idle,
    Loading,
    Failed(String),
    Loaded {
        entries: Vec<CountryRisk>,
        stats: HeatmapStats,
    },
}

/// The compliance heatmap screen.
///
/// Changing the filter never triggers a request; only [`HeatmapView::fetch`]
/// and [`HeatmapView::refresh`] talk to the backend.
#[derive(Debug, Clone)]
pub struct HeatmapView {
    state: HeatmapState,
    filter: RiskFilter,
}

impl Default for HeatmapView {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatmapView {
    pub fn new() -> Self {
        Self {
            state: HeatmapState::Idle,
            filter: RiskFilter::All,
        }
    }

    pub fn state(&self) -> &HeatmapState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, HeatmapState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            HeatmapState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn filter(&self) -> RiskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: RiskFilter) {
        self.filter = filter;
    }

    /// All entries, sorted. Empty unless loaded.
    pub fn entries(&self) -> &[CountryRisk] {
        match &self.state {
            HeatmapState::Loaded { entries, .. } => entries,
            _ => &[],
        }
    }

    /// Entries passing the current filter.
    pub fn visible(&self) -> Vec<&CountryRisk> {
        self.filter.apply(self.entries())
    }

    /// Counts over the full list, independent of the filter.
    pub fn stats(&self) -> Option<HeatmapStats> {
        match &self.state {
            HeatmapState::Loaded { stats, .. } => Some(*stats),
            _ => None,
        }
    }

    /// Loads the heatmap from the backend.
    pub async fn fetch<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        let span = info_span!("heatmap");
        let start = Instant::now();
        self.state = HeatmapState::Loading;

        match client.compliance_heatmap().instrument(span.clone()).await {
            Ok(response) => {
                let _entered = span.enter();
                let entries = build_heatmap(&response.compliance_heatmap);
                let stats = HeatmapStats::from_entries(&entries);
                info!(
                    countries = stats.total,
                    high = stats.high,
                    medium = stats.medium,
                    low = stats.low,
                    duration_ms = start.elapsed().as_millis(),
                    "heatmap loaded"
                );
                self.state = HeatmapState::Loaded { entries, stats };
                Ok(())
            }
            Err(error) => {
                warn!(%error, "heatmap request failed");
                self.state = HeatmapState::Failed(error.to_string());
                Err(error)
            }
        }
    }

    /// Re-runs the fetch. The filter is kept.
    pub async fn refresh<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.fetch(client).await
    }
}
