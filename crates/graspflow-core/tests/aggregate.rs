use polars::prelude::*;

use graspflow_core::aggregate::{aggregate_features, StreamMetadata};
use graspflow_core::error::PipelineError;
use graspflow_core::extractors::{ApertureExtractor, PolygonFeatureExtractor};
use graspflow_core::polygon::JointGroup;

fn stream(rows: &[(f64, &str, f64, f64, f64)]) -> DataFrame {
    let timestamps: Vec<f64> = rows.iter().map(|row| row.0).collect();
    let names: Vec<&str> = rows.iter().map(|row| row.1).collect();
    let xs: Vec<f64> = rows.iter().map(|row| row.2).collect();
    let ys: Vec<f64> = rows.iter().map(|row| row.3).collect();
    let zs: Vec<f64> = rows.iter().map(|row| row.4).collect();
    df!(
        "Timestamp" => timestamps,
        "Name" => names,
        "PosX" => xs,
        "PosY" => ys,
        "PosZ" => zs,
    )
    .unwrap()
}

fn metadata(object: &str, source: &str) -> StreamMetadata {
    StreamMetadata {
        object_label: object.to_string(),
        source_id: source.to_string(),
    }
}

#[test]
fn every_row_carries_its_stream_labels() {
    let cube = stream(&[
        (0.1, "R_ThumbTip", 0.0, 0.0, 0.0),
        (0.1, "R_IndexTip", 3.0, 4.0, 0.0),
        (0.2, "R_ThumbTip", 0.0, 0.0, 0.0),
        (0.2, "R_IndexTip", 0.0, 0.0, 1.0),
    ]);
    let sphere = stream(&[
        (5.0, "R_ThumbTip", 1.0, 0.0, 0.0),
        (5.0, "R_IndexTip", 2.0, 0.0, 0.0),
    ]);
    let streams = vec![
        (cube, metadata("BigCube", "User0_TransformLog_BigCube_Grasp_config3.csv")),
        (sphere, metadata("Sphere", "User0_TransformLog_Sphere_Grasp_config7.csv")),
    ];

    let extractor = ApertureExtractor::new("R_ThumbTip", "R_IndexTip");
    let table = aggregate_features(&streams, &extractor).expect("aggregation succeeded");

    assert_eq!(table.height(), 3);
    assert_eq!(
        table.get_column_names(),
        ["Timestamp", "Aperture", "Object", "ConfigFile"]
    );

    let objects = table.column("Object").unwrap().str().unwrap();
    assert_eq!(objects.get(0), Some("BigCube"));
    assert_eq!(objects.get(1), Some("BigCube"));
    assert_eq!(objects.get(2), Some("Sphere"));

    let sources = table.column("ConfigFile").unwrap().str().unwrap();
    assert_eq!(
        sources.get(2),
        Some("User0_TransformLog_Sphere_Grasp_config7.csv")
    );
}

#[test]
fn empty_batch_is_an_error() {
    let extractor = ApertureExtractor::new("R_ThumbTip", "R_IndexTip");
    let err = aggregate_features(&[], &extractor).expect_err("aggregation should fail");
    match err {
        PipelineError::EmptyAggregation => {}
        other => panic!("expected EmptyAggregation, got {other:?}"),
    }
}

#[test]
fn streams_with_no_feature_rows_still_stack() {
    let group = JointGroup {
        name: "tri".to_string(),
        joints: vec!["A".to_string(), "B".to_string(), "C".to_string()],
    };
    let complete = stream(&[
        (0.1, "A", 0.0, 0.0, 0.0),
        (0.1, "B", 1.0, 0.0, 0.0),
        (0.1, "C", 0.0, 1.0, 0.0),
    ]);
    // Only two of the three joints ever appear, so this stream contributes
    // zero rows while keeping the same columns.
    let partial = stream(&[(0.2, "A", 0.0, 0.0, 0.0), (0.2, "B", 1.0, 0.0, 0.0)]);
    let streams = vec![
        (complete, metadata("BigCube", "cube.csv")),
        (partial, metadata("Sphere", "sphere.csv")),
    ];

    let extractor = PolygonFeatureExtractor::new(vec![group]);
    let table = aggregate_features(&streams, &extractor).expect("aggregation succeeded");

    assert_eq!(table.height(), 1);
    assert_eq!(table.width(), 12);

    let objects = table.column("Object").unwrap().str().unwrap();
    assert_eq!(objects.get(0), Some("BigCube"));
}
