use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use tracing::debug;

/// Computes the grip aperture series for one position stream: the Euclidean
/// distance between two joints at every timestamp where both were sampled.
///
/// Rows are matched by timestamp value, never by row position, so a dropped
/// sample on one joint shifts nothing. Timestamps carrying only one of the
/// two joints produce no output row. Output order follows first appearance
/// in the input.
pub fn extract_aperture(
    df: &DataFrame,
    joint_a: &str,
    joint_b: &str,
) -> Result<DataFrame, PolarsError> {
    let timestamps = df.column("Timestamp")?.f64()?;
    let names = df.column("Name")?.str()?;
    let xs = df.column("PosX")?.f64()?;
    let ys = df.column("PosY")?.f64()?;
    let zs = df.column("PosZ")?.f64()?;

    let mut order: Vec<f64> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut positions_a: HashMap<u64, [f64; 3]> = HashMap::new();
    let mut positions_b: HashMap<u64, [f64; 3]> = HashMap::new();

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
        // First sample wins if a joint repeats within one timestamp. When
        // both joint names are the same the distance degenerates to zero.
        if name == joint_a {
            positions_a.entry(key).or_insert([x, y, z]);
        }
        if name == joint_b {
            positions_b.entry(key).or_insert([x, y, z]);
        }
    }

    let mut out_timestamps: Vec<f64> = Vec::new();
    let mut out_distances: Vec<f64> = Vec::new();
    let mut unmatched = 0usize;

    for ts in order {
        let key = ts.to_bits();
        match (positions_a.get(&key), positions_b.get(&key)) {
            (Some(a), Some(b)) => {
                let dx = a[0] - b[0];
                let dy = a[1] - b[1];
                let dz = a[2] - b[2];
                out_timestamps.push(ts);
                out_distances.push((dx * dx + dy * dy + dz * dz).sqrt());
            }
            (Some(_), None) | (None, Some(_)) => unmatched += 1,
            (None, None) => {}
        }
    }

    if unmatched > 0 {
        debug!(
            joint_a,
            joint_b, unmatched, "timestamps dropped with only one joint present"
        );
    }

    df!(
        "Timestamp" => out_timestamps,
        "Aperture" => out_distances,
    )
}
