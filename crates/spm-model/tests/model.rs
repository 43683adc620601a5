//! Wire shapes of the backend payloads.

use serde_json::json;
use spm_model::{
    AnalyzeRequest, AnalyzeResponse, ComplianceHeatmapResponse, FieldMapping, HealthStatus,
    SimulationResult, UploadedDataset,
};

#[test]
fn upload_response_decodes() {
    let dataset: UploadedDataset = serde_json::from_value(json!({
        "headers": ["Name", "Pay"],
        "rows": [["Ann", "100"], ["Bob"]]
    }))
    .expect("decode upload response");
    assert_eq!(dataset.column_count(), 2);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.row_objects()[1]["Pay"], "");
}

#[test]
fn upload_response_requires_rows() {
    let result = serde_json::from_value::<UploadedDataset>(json!({"headers": ["Name"]}));
    assert!(result.is_err());
    let result = serde_json::from_value::<UploadedDataset>(json!({"headers": "Name", "rows": []}));
    assert!(result.is_err());
}

#[test]
fn analyze_response_tolerates_list_suggestions() {
    let response: AnalyzeResponse = serde_json::from_value(json!({
        "mappings": {
            "Employee Name": "full_name",
            "Names": ["first_name", "last_name"],
            "Amount": null
        }
    }))
    .expect("decode analyze response");
    assert!(response.notes.is_empty());
    assert_eq!(response.suggestion_for("Employee Name"), "full_name");
    assert_eq!(response.suggestion_for("Names"), "");
    assert_eq!(response.suggestion_for("Amount"), "");
    assert_eq!(response.suggestion_for("Absent"), "");

    let mapping = FieldMapping::from_suggestion(response.suggestion_for("Names"));
    assert!(!mapping.is_mapped());
    assert!(!mapping.is_overridden());
}

#[test]
fn analyze_request_encodes() {
    let request = AnalyzeRequest {
        headers: vec!["a".to_string()],
        rows: Some(vec![vec!["1".to_string()]]),
    };
    assert_eq!(
        serde_json::to_value(&request).expect("encode"),
        json!({"headers": ["a"], "rows": [["1"]]})
    );
}

#[test]
fn simulation_lists_are_optional() {
    let result: SimulationResult = serde_json::from_value(json!({
        "impact_summary": "Neutral",
        "cost_analysis": {
            "estimated_change": "0%",
            "currency_impact": "none",
            "tax_implications": "none"
        }
    }))
    .expect("decode simulation result");
    assert!(result.compliance_notes.is_empty());
    assert!(result.recommendations.is_empty());
    assert_eq!(result.cost_rows()[2], ("Tax Implications", "none"));
}

#[test]
fn heatmap_and_health_decode() {
    let heatmap: ComplianceHeatmapResponse = serde_json::from_value(json!({
        "compliance_heatmap": {"US": "Low risk", "DE": "High"}
    }))
    .expect("decode heatmap");
    assert_eq!(heatmap.compliance_heatmap.len(), 2);

    let health: HealthStatus =
        serde_json::from_value(json!({"status": "healthy", "version": "1.0.0"}))
            .expect("decode health");
    assert!(health.is_healthy());
    let health: HealthStatus =
        serde_json::from_value(json!({"status": "degraded"})).expect("decode health");
    assert!(!health.is_healthy());
}

