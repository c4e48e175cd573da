use polars::prelude::*;

use graspflow_core::config::DEFAULT_POLYGON_GROUPS;
use graspflow_core::polygon::{extract_polygon_features, JointGroup};

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

fn triangle_group() -> JointGroup {
    JointGroup {
        name: "tri".to_string(),
        joints: vec!["A".to_string(), "B".to_string(), "C".to_string()],
    }
}

fn value(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}

#[test]
fn triangle_edges_wrap_and_sum_to_zero() {
    // A=(0,0,0), B=(1,0,0), C=(0,1,0): edge0=B-A, edge1=C-B, edge2=A-C.
    let df = stream(&[
        (0.1, "A", 0.0, 0.0, 0.0),
        (0.1, "B", 1.0, 0.0, 0.0),
        (0.1, "C", 0.0, 1.0, 0.0),
    ]);

    let result = extract_polygon_features(&df, &[triangle_group()]).expect("polygon computed");
    assert_eq!(result.height(), 1);
    assert_eq!(
        result.get_column_names(),
        [
            "Timestamp",
            "tri_edge0_x",
            "tri_edge0_y",
            "tri_edge0_z",
            "tri_edge1_x",
            "tri_edge1_y",
            "tri_edge1_z",
            "tri_edge2_x",
            "tri_edge2_y",
            "tri_edge2_z",
        ]
    );

    let expected = [
        ("tri_edge0_x", 1.0),
        ("tri_edge0_y", 0.0),
        ("tri_edge0_z", 0.0),
        ("tri_edge1_x", -1.0),
        ("tri_edge1_y", 1.0),
        ("tri_edge1_z", 0.0),
        ("tri_edge2_x", 0.0),
        ("tri_edge2_y", -1.0),
        ("tri_edge2_z", 0.0),
    ];
    for (column, wanted) in expected {
        assert!(
            (value(&result, column, 0).unwrap() - wanted).abs() < 1e-9,
            "unexpected value in {column}"
        );
    }

    for axis in ["x", "y", "z"] {
        let sum: f64 = (0..3)
            .map(|edge| value(&result, &format!("tri_edge{edge}_{axis}"), 0).unwrap())
            .sum();
        assert!(sum.abs() < 1e-9, "edges along {axis} do not close");
    }
}

#[test]
fn groups_fail_independently_within_a_frame() {
    let groups = DEFAULT_POLYGON_GROUPS.clone();
    // All five tip joints are present at 10.0; the intermediate plate is
    // missing R_RingIntermediate.
    let df = stream(&[
        (10.0, "R_ThumbTip", 0.0, 0.0, 0.0),
        (10.0, "R_IndexTip", 1.0, 0.0, 0.0),
        (10.0, "R_MiddleTip", 1.0, 1.0, 0.0),
        (10.0, "R_RingTip", 0.5, 1.5, 0.0),
        (10.0, "R_LittleTip", 0.0, 1.0, 0.0),
        (10.0, "R_ThumbDistal", 0.0, 0.0, 1.0),
        (10.0, "R_IndexIntermediate", 1.0, 0.0, 1.0),
        (10.0, "R_MiddleIntermediate", 1.0, 1.0, 1.0),
        (10.0, "R_LittleIntermediate", 0.0, 1.0, 1.0),
    ]);

    let result = extract_polygon_features(&df, &groups).expect("polygon computed");
    assert_eq!(result.height(), 1);
    // One Timestamp column plus five edges times three axes per group.
    assert_eq!(result.width(), 31);

    assert!(value(&result, "tip_edge0_x", 0).is_some());
    assert!(value(&result, "tip_edge4_z", 0).is_some());
    assert!(value(&result, "intermediate_edge0_x", 0).is_none());
    assert!(value(&result, "intermediate_edge4_z", 0).is_none());
}

#[test]
fn frame_completing_no_group_yields_no_row() {
    let df = stream(&[
        (0.1, "A", 0.0, 0.0, 0.0),
        (0.1, "B", 1.0, 0.0, 0.0),
        (0.2, "A", 0.0, 0.0, 0.0),
        (0.2, "B", 1.0, 0.0, 0.0),
        (0.2, "C", 0.0, 1.0, 0.0),
    ]);

    let result = extract_polygon_features(&df, &[triangle_group()]).expect("polygon computed");
    assert_eq!(result.height(), 1);
    assert!((value(&result, "Timestamp", 0).unwrap() - 0.2).abs() < 1e-9);
}

#[test]
fn empty_stream_keeps_the_column_grid() {
    let result = extract_polygon_features(&stream(&[]), &[triangle_group()])
        .expect("polygon computed");
    assert_eq!(result.height(), 0);
    assert_eq!(result.width(), 10);
}

#[test]
fn degenerate_groups_still_produce_edges() {
    let groups = vec![
        JointGroup {
            name: "solo".to_string(),
            joints: vec!["A".to_string()],
        },
        JointGroup {
            name: "pair".to_string(),
            joints: vec!["A".to_string(), "B".to_string()],
        },
    ];
    let df = stream(&[(0.1, "A", 1.0, 2.0, 3.0), (0.1, "B", 4.0, 2.0, 3.0)]);

    let result = extract_polygon_features(&df, &groups).expect("polygon computed");
    assert_eq!(result.height(), 1);

    // A one-joint cycle loops back on itself.
    for axis in ["x", "y", "z"] {
        let v = value(&result, &format!("solo_edge0_{axis}"), 0).unwrap();
        assert!(v.abs() < 1e-9);
    }

    // A two-joint cycle walks there and back.
    assert!((value(&result, "pair_edge0_x", 0).unwrap() - 3.0).abs() < 1e-9);
    assert!((value(&result, "pair_edge1_x", 0).unwrap() + 3.0).abs() < 1e-9);
}

#[test]
fn polygon_rows_follow_first_appearance_order() {
    let df = stream(&[
        (5.0, "A", 0.0, 0.0, 0.0),
        (5.0, "B", 1.0, 0.0, 0.0),
        (5.0, "C", 0.0, 1.0, 0.0),
        (4.0, "A", 0.0, 0.0, 0.0),
        (4.0, "B", 1.0, 0.0, 0.0),
        (4.0, "C", 0.0, 1.0, 0.0),
    ]);

    let result = extract_polygon_features(&df, &[triangle_group()]).expect("polygon computed");
    let timestamps = result.column("Timestamp").unwrap().f64().unwrap();
    assert!((timestamps.get(0).unwrap() - 5.0).abs() < 1e-9);
    assert!((timestamps.get(1).unwrap() - 4.0).abs() < 1e-9);
}
