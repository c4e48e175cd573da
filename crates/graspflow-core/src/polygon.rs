use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named cycle of joints. The polygon closes back on its first joint, so a
/// group of `k` joints yields `k` edge vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointGroup {
    pub name: String,
    pub joints: Vec<String>,
}

/// Computes closed-polygon edge vectors per joint group, one output row per
/// timestamp. Edge `i` runs from joint `i` to joint `i + 1` (wrapping), and
/// each edge contributes an x, y, z column named
/// `{group}_edge{i}_{axis}`.
///
/// Groups are independent: a frame missing a joint nulls out only that
/// group's columns. A frame completing no group at all produces no row.
pub fn extract_polygon_features(
    df: &DataFrame,
    groups: &[JointGroup],
) -> Result<DataFrame, PolarsError> {
    let timestamps = df.column("Timestamp")?.f64()?;
    let names = df.column("Name")?.str()?;
    let xs = df.column("PosX")?.f64()?;
    let ys = df.column("PosY")?.f64()?;
    let zs = df.column("PosZ")?.f64()?;

    let mut order: Vec<f64> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut frames: HashMap<u64, HashMap<&str, [f64; 3]>> = HashMap::new();

    for idx in 0..df.height() {
        let (Some(ts), Some(name), Some(x), Some(y), Some(z)) = (
            timestamps.get(idx),
            names.get(idx),
            xs.get(idx),
            ys.get(idx),
            zs.get(idx),
        ) else {
            continue;
        };

        let key = ts.to_bits();
        if seen.insert(key) {
            order.push(ts);
        }
        // First sample wins if a joint repeats within one timestamp.
        frames
            .entry(key)
            .or_default()
            .entry(name)
            .or_insert([x, y, z]);
    }

    let mut column_names: Vec<String> = Vec::new();
    for group in groups {
        for edge in 0..group.joints.len() {
            for axis in ["x", "y", "z"] {
                column_names.push(format!("{}_edge{}_{}", group.name, edge, axis));
            }
        }
    }
    let mut column_values: Vec<Vec<Option<f64>>> = vec![Vec::new(); column_names.len()];
    let mut out_timestamps: Vec<f64> = Vec::new();

    let mut incomplete_groups = 0usize;
    let mut dropped_frames = 0usize;

    for ts in order {
        let frame = frames
            .remove(&ts.to_bits())
            .expect("frame recorded for every seen timestamp");

        let mut edge_sets: Vec<Option<Vec<f64>>> = Vec::with_capacity(groups.len());
        let mut any_complete = false;
        for group in groups {
            let points: Option<Vec<[f64; 3]>> = group
                .joints
                .iter()
                .map(|joint| frame.get(joint.as_str()).copied())
                .collect();
            match points {
                Some(points) => {
                    let k = points.len();
                    let mut components = Vec::with_capacity(3 * k);
                    for i in 0..k {
                        let p = points[i];
                        let q = points[(i + 1) % k];
                        components.push(q[0] - p[0]);
                        components.push(q[1] - p[1]);
                        components.push(q[2] - p[2]);
                    }
                    edge_sets.push(Some(components));
                    any_complete = true;
                }
                None => {
                    incomplete_groups += 1;
                    edge_sets.push(None);
                }
            }
        }

        if !any_complete {
            dropped_frames += 1;
            continue;
        }

        out_timestamps.push(ts);
        let mut cursor = 0usize;
        for (group, components) in groups.iter().zip(edge_sets) {
            match components {
                Some(components) => {
                    for value in components {
                        column_values[cursor].push(Some(value));
                        cursor += 1;
                    }
                }
                None => {
                    for _ in 0..3 * group.joints.len() {
                        column_values[cursor].push(None);
                        cursor += 1;
                    }
                }
            }
        }
    }

    if incomplete_groups > 0 || dropped_frames > 0 {
        debug!(
            incomplete_groups,
            dropped_frames, "frames with missing joints encountered"
        );
    }

    let mut columns: Vec<Column> = Vec::with_capacity(1 + column_names.len());
    columns.push(Series::new("Timestamp".into(), out_timestamps).into());
    for (name, values) in column_names.into_iter().zip(column_values) {
        columns.push(Series::new(name.into(), values).into());
    }
    DataFrame::new(columns)
}
