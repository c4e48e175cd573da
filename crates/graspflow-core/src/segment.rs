use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

use graspflow_parser::{EventTimeline, TrialId};

/// One trial's window on the shared experiment clock, taken from the event
/// timeline. The trailing time buffer is applied at crop time, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialWindow {
    pub trial: TrialId,
    pub start_time: f64,
    pub end_time: f64,
}

/// A cropped position stream for one trial. `source` names the stream the
/// rows came from; row order matches the source stream.
#[derive(Debug, Clone)]
pub struct TrialSegment {
    pub window: TrialWindow,
    pub source: String,
    pub frame: DataFrame,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedTrial {
    pub trial: TrialId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    MissingTransformLog,
    ParseFailed,
    EmptyWindow,
}

#[derive(Debug, Clone)]
pub struct SegmentationResult {
    pub segments: Vec<TrialSegment>,
    pub skipped: Vec<SkippedTrial>,
}

/// Extracts the trial windows from a timeline, in timeline order. Rows whose
/// name does not parse as a trial id (calibration phases, breaks) are passed
/// over.
pub fn trial_windows(timeline: &EventTimeline) -> Vec<TrialWindow> {
    timeline
        .events
        .iter()
        .filter_map(|event| {
            TrialId::new(event.name.as_str())
                .ok()
                .map(|trial| TrialWindow {
                    trial,
                    start_time: event.start_time,
                    end_time: event.end_time,
                })
        })
        .collect()
}

/// Restricts a position stream to `[start_time, end_time + time_buffer]`,
/// both boundaries inclusive. Row order is preserved; rows are never
/// modified.
pub fn crop_to_window(
    df: &DataFrame,
    window: &TrialWindow,
    time_buffer: f64,
) -> Result<DataFrame, PolarsError> {
    let upper = window.end_time + time_buffer;
    df.clone()
        .lazy()
        .filter(
            col("Timestamp")
                .gt_eq(lit(window.start_time))
                .and(col("Timestamp").lt_eq(lit(upper))),
        )
        .collect()
}

/// Slices one continuous position stream into per-trial segments. Trials
/// whose window holds no samples are reported rather than silently dropped.
pub fn segment_stream(
    timeline: &EventTimeline,
    positions: &DataFrame,
    source: &str,
    time_buffer: f64,
) -> Result<SegmentationResult, PolarsError> {
    let mut segments = Vec::new();
    let mut skipped = Vec::new();

    for window in trial_windows(timeline) {
        let frame = crop_to_window(positions, &window, time_buffer)?;
        if frame.height() == 0 {
            warn!(
                "trial {} in {source} has no samples within its window; skipping",
                window.trial
            );
            skipped.push(SkippedTrial {
                trial: window.trial,
                reason: SkipReason::EmptyWindow,
            });
            continue;
        }
        segments.push(TrialSegment {
            window,
            source: source.to_string(),
            frame,
        });
    }

    Ok(SegmentationResult { segments, skipped })
}
