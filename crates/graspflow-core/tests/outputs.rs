use std::fs;

use polars::prelude::*;

use graspflow_core::outputs::{write_feature_table, write_run_summary, RunSummary};

#[test]
fn feature_table_lands_with_header_and_rows() {
    let dir = tempfile::tempdir().expect("tempdir created");
    let path = dir.path().join("nested").join("features.csv");

    let df = df!(
        "Timestamp" => [1.0f64, 2.0],
        "Aperture" => [0.5f64, 0.75],
    )
    .unwrap();

    write_feature_table(&df, &path).expect("table written");

    let written = fs::read_to_string(&path).expect("table readable");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Timestamp,Aperture");
    assert!(lines[1].starts_with("1.0,"));
}

#[test]
fn run_summary_records_the_run_shape() {
    let dir = tempfile::tempdir().expect("tempdir created");
    let path = dir.path().join("features.meta.json");

    let summary = RunSummary::new("grasp_aperture", 4, 1, 120);
    write_run_summary(&summary, &path).expect("summary written");

    let raw = fs::read_to_string(&path).expect("summary readable");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("summary is valid json");

    assert_eq!(value["extractor"], "grasp_aperture");
    assert_eq!(value["input_files"], 4);
    assert_eq!(value["skipped_files"], 1);
    assert_eq!(value["output_rows"], 120);
    assert!(value["generated_at"]
        .as_str()
        .is_some_and(|stamp| !stamp.is_empty()));
}
