use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::polygon::JointGroup;

/// The joint groups used when a configuration does not declare its own:
/// the five fingertips and the five next segments down, each closed into a
/// polygon across the hand.
pub static DEFAULT_POLYGON_GROUPS: Lazy<Vec<JointGroup>> = Lazy::new(|| {
    vec![
        JointGroup {
            name: "tip".to_string(),
            joints: vec![
                "R_ThumbTip".to_string(),
                "R_IndexTip".to_string(),
                "R_MiddleTip".to_string(),
                "R_RingTip".to_string(),
                "R_LittleTip".to_string(),
            ],
        },
        JointGroup {
            name: "intermediate".to_string(),
            joints: vec![
                "R_ThumbDistal".to_string(),
                "R_IndexIntermediate".to_string(),
                "R_MiddleIntermediate".to_string(),
                "R_RingIntermediate".to_string(),
                "R_LittleIntermediate".to_string(),
            ],
        },
    ]
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub segmentation: SegmentationConfig,
    pub subjects: SubjectConfig,
    pub aperture: ApertureConfig,
    pub polygon: PolygonConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            subjects: SubjectConfig::default(),
            aperture: ApertureConfig::default(),
            polygon: PolygonConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Seconds appended after each trial's end time when cropping, so the
    /// release phase of a grasp is retained.
    pub time_buffer_s: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self { time_buffer_s: 0.5 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Subject folder names to process; empty means every folder found on
    /// disk.
    pub include: Vec<String>,
    /// Subject folder names to skip even when present.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApertureConfig {
    pub joint_a: String,
    pub joint_b: String,
}

impl Default for ApertureConfig {
    fn default() -> Self {
        Self {
            joint_a: "R_ThumbTip".to_string(),
            joint_b: "R_IndexTip".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonConfig {
    pub groups: Vec<JointGroup>,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            groups: DEFAULT_POLYGON_GROUPS.clone(),
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.segmentation.time_buffer_s.is_finite() || self.segmentation.time_buffer_s < 0.0 {
            return Err(PipelineError::Config(format!(
                "segmentation.time_buffer_s must be a non-negative number, got {}",
                self.segmentation.time_buffer_s
            )));
        }

        if self.aperture.joint_a.trim().is_empty() || self.aperture.joint_b.trim().is_empty() {
            return Err(PipelineError::Config(
                "aperture.joint_a and aperture.joint_b must not be empty".to_string(),
            ));
        }

        if self.polygon.groups.is_empty() {
            return Err(PipelineError::Config(
                "polygon.groups must contain at least one group".to_string(),
            ));
        }

        let mut seen_groups = HashSet::new();
        for group in &self.polygon.groups {
            if group.name.trim().is_empty() {
                return Err(PipelineError::Config(
                    "polygon group names must not be empty".to_string(),
                ));
            }
            if !seen_groups.insert(group.name.as_str()) {
                return Err(PipelineError::Config(format!(
                    "duplicate polygon group name '{}'",
                    group.name
                )));
            }
            if group.joints.is_empty() {
                return Err(PipelineError::Config(format!(
                    "polygon group '{}' must list at least one joint",
                    group.name
                )));
            }
            let mut seen_joints = HashSet::new();
            for joint in &group.joints {
                if joint.trim().is_empty() {
                    return Err(PipelineError::Config(format!(
                        "polygon group '{}' contains an empty joint name",
                        group.name
                    )));
                }
                if !seen_joints.insert(joint.as_str()) {
                    return Err(PipelineError::Config(format!(
                        "polygon group '{}' lists joint '{joint}' more than once",
                        group.name
                    )));
                }
            }
        }

        Ok(())
    }
}
