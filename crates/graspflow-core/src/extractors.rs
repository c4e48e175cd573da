use polars::prelude::*;

use crate::aperture::extract_aperture;
use crate::polygon::{extract_polygon_features, JointGroup};

/// A feature computation over one cropped position stream.
pub trait FeatureExtractor: Send + Sync {
    /// Stable identifier recorded alongside anything this extractor produces.
    fn code_identifier(&self) -> &'static str;

    /// Produces the feature table for one position stream.
    fn extract(&self, df: &DataFrame) -> Result<DataFrame, PolarsError>;
}

/// Grip aperture: distance between two configured joints over time.
pub struct ApertureExtractor {
    joint_a: String,
    joint_b: String,
}

impl ApertureExtractor {
    pub fn new(joint_a: impl Into<String>, joint_b: impl Into<String>) -> Self {
        Self {
            joint_a: joint_a.into(),
            joint_b: joint_b.into(),
        }
    }
}

impl FeatureExtractor for ApertureExtractor {
    fn code_identifier(&self) -> &'static str {
        "grasp_aperture"
    }

    fn extract(&self, df: &DataFrame) -> Result<DataFrame, PolarsError> {
        extract_aperture(df, &self.joint_a, &self.joint_b)
    }
}

/// Hand-shape polygons: edge vectors over the configured joint groups.
pub struct PolygonFeatureExtractor {
    groups: Vec<JointGroup>,
}

impl PolygonFeatureExtractor {
    pub fn new(groups: Vec<JointGroup>) -> Self {
        Self { groups }
    }
}

impl FeatureExtractor for PolygonFeatureExtractor {
    fn code_identifier(&self) -> &'static str {
        "grasp_polygons"
    }

    fn extract(&self, df: &DataFrame) -> Result<DataFrame, PolarsError> {
        extract_polygon_features(df, &self.groups)
    }
}
