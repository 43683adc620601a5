//! Heatmap view against a mock backend.

use proptest::prelude::*;
use serde_json::json;
use spm_client::ApiClient;
use spm_client::endpoints;
use spm_client::mock::MockTransport;
use spm_compliance::{HeatmapState, HeatmapStats, HeatmapView, RiskFilter, build_heatmap};
use spm_model::{RiskLevel, SpmError};
use std::collections::BTreeMap;

fn countries(entries: &[&spm_model::CountryRisk]) -> Vec<String> {
    entries.iter().map(|entry| entry.country.clone()).collect()
}

#[tokio::test]
async fn fetch_sorts_and_filters() {
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_json(json!({
        "compliance_heatmap": {"A": "low", "B": "high", "C": "moderate"}
    }));

    let mut view = HeatmapView::new();
    view.fetch(&client).await.unwrap();

    assert_eq!(countries(&view.visible()), vec!["B", "C", "A"]);
    let stats = view.stats().unwrap();
    assert_eq!(
        stats,
        HeatmapStats {
            total: 3,
            high: 1,
            medium: 1,
            low: 1
        }
    );

    view.set_filter(RiskFilter::Low);
    assert_eq!(countries(&view.visible()), vec!["A"]);
    assert_eq!(view.stats().unwrap(), stats);
    assert_eq!(client.transport().request_count(), 1);

    let request = client.transport().last_request().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, endpoints::COMPLIANCE_HEATMAP);
}

#[test]
fn new_view_is_idle_until_fetched() {
    let view = HeatmapView::new();
    assert_eq!(view.state(), &HeatmapState::Idle);
    assert!(!view.is_loading());
    assert!(view.error().is_none());
    assert!(view.entries().is_empty());
    assert!(view.stats().is_none());
    assert_eq!(view.filter(), RiskFilter::All);
}

#[tokio::test]
async fn labelled_risk_texts_sort_by_priority() {
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_json(json!({
        "compliance_heatmap": {"A": "Low risk", "B": "High risk", "C": "Medium risk"}
    }));

    let mut view = HeatmapView::new();
    view.fetch(&client).await.unwrap();

    assert_eq!(countries(&view.visible()), vec!["B", "C", "A"]);
    let levels: Vec<RiskLevel> = view.entries().iter().map(|entry| entry.level).collect();
    assert_eq!(levels, vec![RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]);
}

#[tokio::test]
async fn failure_then_refresh() {
    let client = ApiClient::new(MockTransport::new());
    client
        .transport()
        .push_error(SpmError::Network("timed out".to_string()));
    client
        .transport()
        .push_json(json!({"compliance_heatmap": {"DE": "Medium"}}));

    let mut view = HeatmapView::new();
    view.set_filter(RiskFilter::Medium);
    assert!(view.fetch(&client).await.is_err());
    assert!(view.error().unwrap().contains("timed out"));
    assert!(view.entries().is_empty());
    assert!(view.stats().is_none());

    view.refresh(&client).await.unwrap();
    assert!(view.error().is_none());
    assert!(matches!(view.state(), HeatmapState::Loaded { .. }));
    assert_eq!(view.filter(), RiskFilter::Medium);
    assert_eq!(countries(&view.visible()), vec!["DE"]);
}

#[tokio::test]
async fn malformed_payload_is_shape_error() {
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_json(json!({"heatmap": []}));

    let mut view = HeatmapView::new();
    let err = view.fetch(&client).await.unwrap_err();
    assert!(matches!(err, SpmError::ResponseShape { .. }));
    assert!(view.error().is_some());
}

proptest! {
    #[test]
    fn sorted_and_stats_consistent(raw in prop::collection::btree_map("[A-Z]{2}", "[a-zA-Z ]{0,20}", 0..20)) {
        let raw: BTreeMap<String, String> = raw;
        let entries = build_heatmap(&raw);
        prop_assert_eq!(entries.len(), raw.len());
        for pair in entries.windows(2) {
            let ordered = pair[0].priority() > pair[1].priority()
                || (pair[0].priority() == pair[1].priority() && pair[0].country <= pair[1].country);
            prop_assert!(ordered);
        }

        let stats = HeatmapStats::from_entries(&entries);
        prop_assert_eq!(stats.high + stats.medium + stats.low, stats.total);
        for level in RiskLevel::ALL {
            let filter: RiskFilter = level.label().parse().unwrap();
            prop_assert_eq!(filter.apply(&entries).len(), stats.count(level));
        }
    }
}
