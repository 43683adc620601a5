//! Upload, simulation, export and wizard flows against a mock backend.

use std::collections::BTreeMap;
use std::fs;

use serde_json::json;
use spm_client::ApiClient;
use spm_client::endpoints;
use spm_client::mock::MockTransport;
use spm_model::{SpmError, UploadedDataset};
use spm_workflow::{ExportStep, PolicyPanel, UploadStep, Wizard, WizardStep, save_to};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn dataset(headers: &[&str], rows: &[&[&str]]) -> UploadedDataset {
    UploadedDataset::new(
        headers.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    )
}

#[tokio::test]
async fn upload_sends_file_and_clears_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "payroll.csv", "Name,Pay\nAnn,100\n");
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_json(json!({
        "headers": ["Name", "Pay"],
        "rows": [["Ann", "100"]]
    }));

    let mut step = UploadStep::new();
    step.select(&path);
    let uploaded = step.upload(&client).await.unwrap();
    assert_eq!(uploaded.headers, vec!["Name", "Pay"]);
    assert!(step.selected().is_none());
    assert!(step.error().is_none());

    let request = client.transport().last_request().unwrap();
    assert_eq!(request.path, endpoints::UPLOAD);
    let file = request.file.unwrap();
    assert_eq!(file.field, "file");
    assert_eq!(file.filename, "payroll.csv");
    assert_eq!(file.bytes, b"Name,Pay\nAnn,100\n");
}

#[tokio::test]
async fn upload_without_rows_is_shape_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "payroll.csv", "Name\nAnn\n");
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_json(json!({"headers": ["Name"]}));

    let mut step = UploadStep::new();
    step.select(&path);
    let err = step.upload(&client).await.unwrap_err();
    assert!(matches!(err, SpmError::ResponseShape { .. }));
    assert!(step.dataset().is_none());
    assert!(step.selected().is_none());
    assert!(step.error().is_some());
}

#[tokio::test]
async fn local_checks_run_before_any_request() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "payroll.txt", "Name\n");
    let client = ApiClient::new(MockTransport::new());

    let mut step = UploadStep::new();
    step.select(&path);
    assert!(matches!(
        step.upload(&client).await,
        Err(SpmError::Validation(_))
    ));
    assert_eq!(client.transport().request_count(), 0);

    assert!(step.upload(&client).await.is_err());
    assert_eq!(step.error().unwrap(), "No file selected");
}

#[tokio::test]
async fn simulation_request_carries_dataset_and_policy() {
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_json(json!({
        "impact_summary": "Costs rise slightly",
        "cost_analysis": {
            "estimated_change": "+4%",
            "currency_impact": "EUR stronger",
            "tax_implications": "Higher social charges"
        },
        "recommendations": ["Review contracts"]
    }));
    let data = dataset(&["Name", "Pay"], &[&["Ann", "100"]]);

    let mut panel = PolicyPanel::new();
    panel.form.select_country("DE");
    panel.form.salary = "90000.5".to_string();
    panel.form.notes = " move team ".to_string();

    let result = panel.simulate(&client, &data).await.unwrap();
    assert_eq!(result.cost_rows()[0], ("Estimated Change", "+4%"));
    assert!(result.compliance_notes.is_empty());
    assert_eq!(result.recommendations, vec!["Review contracts"]);

    let body = client.transport().last_request().unwrap().body.unwrap();
    insta::assert_json_snapshot!(body, @r#"
    {
      "headers": [
        "Name",
        "Pay"
      ],
      "policy_change": {
        "adjusted_salary": 90000.5,
        "new_currency": "EUR",
        "notes": "move team",
        "target_country": "DE"
      },
      "rows": [
        [
          "Ann",
          "100"
        ]
      ]
    }
    "#);

    panel.reset();
    assert!(panel.result().is_none());
    assert!(panel.error().is_none());
    assert_eq!(panel.form.target_country, "");
}

#[tokio::test]
async fn simulation_without_country_sends_nothing() {
    let client = ApiClient::new(MockTransport::new());
    let mut panel = PolicyPanel::new();

    let err = panel
        .simulate(&client, &dataset(&["a"], &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, SpmError::Validation(_)));
    assert!(panel.error().is_some());
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn export_transforms_rows_and_names_file() {
    let dir = TempDir::new().unwrap();
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_file(
        Some("attachment; filename=\"payroll_std.csv\""),
        b"full_name\nAnn\n".to_vec(),
    );
    let data = dataset(&["a", "b"], &[&["1", "2"], &["3"]]);
    let mappings = BTreeMap::from([
        ("a".to_string(), "full_name".to_string()),
        ("b".to_string(), "bonus".to_string()),
    ]);

    let mut step = ExportStep::new();
    let file = step
        .export(&client, Some(&data), Some(&mappings))
        .await
        .unwrap()
        .clone();
    assert_eq!(file.filename, "payroll_std.csv");

    let body = client.transport().last_request().unwrap().body.unwrap();
    assert_eq!(
        body["rows"],
        json!([{"a": "1", "b": "2"}, {"a": "3", "b": ""}])
    );
    assert_eq!(body["mappings"]["b"], "bonus");

    let saved = save_to(&file, dir.path()).unwrap();
    assert_eq!(fs::read(saved).unwrap(), b"full_name\nAnn\n");
}

#[tokio::test]
async fn export_requires_finalized_mappings() {
    let client = ApiClient::new(MockTransport::new());
    let data = dataset(&["a"], &[&["1"]]);

    let mut step = ExportStep::new();
    assert!(matches!(
        step.export(&client, Some(&data), None).await,
        Err(SpmError::Validation(_))
    ));
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn export_without_disposition_uses_default_name() {
    let client = ApiClient::new(MockTransport::new());
    client.transport().push_file(None, Vec::new());
    let data = dataset(&["a"], &[]);
    let mappings = BTreeMap::new();

    let mut step = ExportStep::new();
    let file = step
        .export(&client, Some(&data), Some(&mappings))
        .await
        .unwrap();
    assert_eq!(file.filename, "standardized_export.csv");
}

#[tokio::test]
async fn wizard_hands_data_between_steps() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "p.csv", "a\n1\n");
    let client = ApiClient::new(MockTransport::new());
    client
        .transport()
        .push_json(json!({"headers": ["a"], "rows": [["1"]]}));

    let mut wizard = Wizard::new();
    let mut upload = UploadStep::new();
    upload.select(&path);
    upload.upload(&client).await.unwrap();
    wizard
        .complete_upload(upload.take_dataset().unwrap())
        .unwrap();
    wizard.confirm_preview().unwrap();
    wizard
        .complete_mapping(BTreeMap::from([("a".to_string(), "other".to_string())]))
        .unwrap();

    assert_eq!(wizard.step(), WizardStep::Success);
    assert_eq!(wizard.dataset().unwrap().rows, vec![vec!["1".to_string()]]);
    assert_eq!(wizard.mappings().unwrap()["a"], "other");
}
