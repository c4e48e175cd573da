use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifier of one grasp trial, e.g. `config19`: an alphabetic prefix
/// followed by an integer suffix. Event timeline rows whose name parses as a
/// `TrialId` mark trials; everything else is a non-trial event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialId(String);

impl TrialId {
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        let trimmed = value.trim();
        let prefix_len = trimmed
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        let suffix = &trimmed[prefix_len..];
        if prefix_len == 0 || suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("invalid trial id '{trimmed}'"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for TrialId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        TrialId::new(value)
    }
}

/// One row of the experiment timeline. Times are seconds on the same clock as
/// the position stream timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
}

/// The full per-subject event timeline, in file order. May contain rows whose
/// names are not trial identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTimeline {
    pub events: Vec<EventRow>,
}

/// A parsed position stream: one row per (timestamp, joint) sample with
/// columns `Timestamp`, `Name`, `PosX`, `PosY`, `PosZ`. Zero data rows is
/// valid; an empty log simply yields no features downstream.
#[derive(Debug, Clone)]
pub struct TransformLog {
    pub df: DataFrame,
}
