//! Tests for survey-model types.

use std::path::PathBuf;

use survey_model::{
    ColumnMap, FileSummary, HealthStatus, KpiResult, ReportArtifacts, RunStatus, TriState,
};

#[test]
fn column_map_deserializes_with_optional_roles() {
    let json = r#"{
        "service_col": "Service",
        "region_col": "Region",
        "satisfied_col": "Satisfied",
        "recommend_col": "Recommend",
        "date_col": "Date"
    }"#;
    let map: ColumnMap = serde_json::from_str(json).expect("deserialize column map");
    assert_eq!(
        map.required_columns(),
        ["Service", "Region", "Satisfied", "Recommend"]
    );
    assert_eq!(map.date_col.as_deref(), Some("Date"));
    assert!(map.respondent_id_col.is_none());
}

#[test]
fn column_map_builder_sets_optional_roles() {
    let map = ColumnMap::new("s", "r", "sat", "rec")
        .with_date_col("d")
        .with_respondent_id_col("id");
    assert_eq!(map.text_columns(), ["s", "r"]);
    assert_eq!(map.flag_columns(), ["sat", "rec"]);
    assert_eq!(map.respondent_id_col.as_deref(), Some("id"));
}

#[test]
fn tristate_conversions() {
    assert_eq!(TriState::from(true), TriState::True);
    assert_eq!(TriState::False.as_bool(), Some(false));
    assert!(!TriState::Unknown.is_known());
    assert_eq!(TriState::Unknown.to_string(), "unknown");
}

#[test]
fn empty_kpis_have_no_rates() {
    let kpis = KpiResult::empty();
    assert!(kpis.is_empty());
    assert!(kpis.satisfaction_rate.is_none());
    let json = serde_json::to_value(&kpis).expect("serialize kpis");
    assert_eq!(json["total_responses"], 0);
    assert!(json["top_region"].is_null());
}

#[test]
fn artifact_paths_follow_attachment_order() {
    let artifacts = ReportArtifacts {
        run_stamp: "20240101_120000".to_string(),
        file_summary: PathBuf::from("out/summary.csv"),
        cleaned: None,
        kpis: Some(PathBuf::from("out/kpis.json")),
    };
    assert_eq!(
        artifacts.paths(),
        vec![
            PathBuf::from("out/summary.csv"),
            PathBuf::from("out/kpis.json")
        ]
    );
}

#[test]
fn run_status_serializes_snake_case() {
    let json = serde_json::to_string(&RunStatus::NoInputs).expect("serialize status");
    assert_eq!(json, "\"no_inputs\"");
    assert_eq!(RunStatus::Fatal.to_string(), "fatal");
}

#[test]
fn file_summary_serializes_fields_in_export_order() {
    let summary = FileSummary {
        filename: "week1.csv".to_string(),
        raw_rows: 10,
        raw_cols: 5,
        clean_rows: 7,
        clean_cols: 5,
    };
    let json = serde_json::to_string(&summary).expect("serialize summary");
    let positions: Vec<usize> = FileSummary::COLUMNS
        .iter()
        .map(|name| json.find(&format!("\"{name}\"")).expect("field present"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn health_status_round_trips_through_text() {
    let status = HealthStatus::new(false, "Run OK but email failed: a | b", "2024-01-01 09:00:00");
    let line = status.to_string();
    assert_eq!(
        line,
        "2024-01-01 09:00:00 | FAIL | Run OK but email failed: a | b"
    );
    assert_eq!(HealthStatus::parse(&line), Some(status));
    assert_eq!(HealthStatus::parse("garbage"), None);
}
