use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use graspflow_parser::{parse_event_log, parse_transform_log, TrialId};

use crate::aggregate::StreamMetadata;
use crate::config::{PipelineConfig, SubjectConfig};
use crate::error::{PipelineError, Result};
use crate::naming;
use crate::segment::{crop_to_window, trial_windows, SkipReason, SkippedTrial};

/// One trial successfully cropped and written out for a subject.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedTrial {
    pub trial: TrialId,
    pub file_name: String,
    pub rows: usize,
}

/// Everything that happened while segmenting one subject directory.
#[derive(Debug, Serialize)]
pub struct SubjectReport {
    pub subject: String,
    pub extracted: Vec<ExtractedTrial>,
    pub skipped: Vec<SkippedTrial>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum SubjectOutcome {
    Completed(SubjectReport),
    Failed { subject: String, error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub subjects: Vec<SubjectOutcome>,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.subjects
            .iter()
            .filter(|outcome| matches!(outcome, SubjectOutcome::Completed(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.subjects.len() - self.completed()
    }
}

/// Position streams gathered for feature extraction, labelled per file.
pub struct FeatureInputs {
    pub streams: Vec<(DataFrame, StreamMetadata)>,
    pub skipped_files: usize,
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lists subject directories under the input root, filtered by the include
/// and exclude lists. An empty include list selects every directory.
pub fn discover_subjects(input_root: &Path, config: &SubjectConfig) -> Result<Vec<PathBuf>> {
    let mut subjects = Vec::new();
    for entry in fs::read_dir(input_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subjects.push(entry.path());
        }
    }
    subjects.sort();

    let selected = subjects
        .into_iter()
        .filter(|dir| {
            let name = leaf_name(dir);
            let included =
                config.include.is_empty() || config.include.iter().any(|entry| entry == &name);
            included && !config.exclude.iter().any(|entry| entry == &name)
        })
        .collect();

    Ok(selected)
}

/// Finds the subject's event log. Fails when none exists; with several, the
/// first in name order wins.
pub fn locate_event_log(subject_dir: &Path) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(subject_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && naming::is_event_log(&leaf_name(&path)) {
            candidates.push(path);
        }
    }
    candidates.sort();

    if candidates.is_empty() {
        return Err(PipelineError::MissingEventLog(subject_dir.to_path_buf()));
    }
    if candidates.len() > 1 {
        warn!(
            "multiple event logs found in {}; using the first in name order",
            subject_dir.display()
        );
    }
    Ok(candidates.remove(0))
}

/// Finds the position stream recorded for a trial, if any. Matching is
/// anchored on the `_{trial}.csv` suffix so `config3` never picks up
/// `config31`.
pub fn find_trial_file(subject_dir: &Path, trial: &TrialId) -> Result<Option<PathBuf>> {
    let mut matches = Vec::new();
    for entry in fs::read_dir(subject_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && naming::is_trial_file(&leaf_name(&path), trial) {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches.into_iter().next())
}

/// Segments one subject directory: reads the event log, crops each trial's
/// position stream to its window plus the time buffer, and writes the crops
/// under `output_dir` with their original file names.
///
/// Trials without a stream, with an unparseable stream, or with an empty
/// window are reported as skipped; nothing is written for them.
pub fn extract_subject(
    subject_dir: &Path,
    output_dir: &Path,
    time_buffer: f64,
) -> Result<SubjectReport> {
    let subject = leaf_name(subject_dir);

    let event_log_path = locate_event_log(subject_dir)?;
    let content = fs::read_to_string(&event_log_path)?;
    let timeline = parse_event_log(&content)?;
    let windows = trial_windows(&timeline);
    info!("segmenting {subject}: {} trial windows", windows.len());

    fs::create_dir_all(output_dir)?;

    let mut extracted = Vec::new();
    let mut skipped = Vec::new();

    for window in windows {
        let Some(stream_path) = find_trial_file(subject_dir, &window.trial)? else {
            warn!(
                "no position stream for trial {} in {subject}; skipping",
                window.trial
            );
            skipped.push(SkippedTrial {
                trial: window.trial,
                reason: SkipReason::MissingTransformLog,
            });
            continue;
        };

        let file_name = leaf_name(&stream_path);
        let content = fs::read_to_string(&stream_path)?;
        let log = match parse_transform_log(&content) {
            Ok(log) => log,
            Err(err) => {
                warn!("failed to parse {file_name}: {err}");
                skipped.push(SkippedTrial {
                    trial: window.trial,
                    reason: SkipReason::ParseFailed,
                });
                continue;
            }
        };

        let cropped = crop_to_window(&log.df, &window, time_buffer)?;
        if cropped.height() == 0 {
            warn!(
                "trial {} in {subject} has no samples within its window; skipping",
                window.trial
            );
            skipped.push(SkippedTrial {
                trial: window.trial,
                reason: SkipReason::EmptyWindow,
            });
            continue;
        }

        write_cropped_stream(&cropped, &output_dir.join(&file_name))?;
        extracted.push(ExtractedTrial {
            trial: window.trial,
            file_name,
            rows: cropped.height(),
        });
    }

    Ok(SubjectReport {
        subject,
        extracted,
        skipped,
    })
}

/// Segments every discovered subject. A failure in one subject is recorded
/// and the batch moves on to the next.
pub fn extract_all_subjects(
    input_root: &Path,
    output_root: &Path,
    config: &PipelineConfig,
) -> Result<BatchReport> {
    let subject_dirs = discover_subjects(input_root, &config.subjects)?;
    if subject_dirs.is_empty() {
        warn!("no subject directories found in {}", input_root.display());
    }

    let mut subjects = Vec::new();
    for dir in subject_dirs {
        let subject = leaf_name(&dir);
        let output_dir = output_root.join(&subject);
        match extract_subject(&dir, &output_dir, config.segmentation.time_buffer_s) {
            Ok(report) => subjects.push(SubjectOutcome::Completed(report)),
            Err(err) => {
                warn!("failed to segment subject {subject}: {err}");
                subjects.push(SubjectOutcome::Failed {
                    subject,
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(BatchReport { subjects })
}

/// Gathers cropped position streams from a directory for batch feature
/// extraction. Event logs are filtered out by name; files that fail to parse
/// are counted and skipped.
pub fn collect_feature_inputs(segment_dir: &Path) -> Result<FeatureInputs> {
    let pattern = segment_dir.join("*.csv");
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        paths.push(entry?);
    }
    paths.sort();

    let mut streams = Vec::new();
    let mut skipped_files = 0usize;

    for path in paths {
        let file_name = leaf_name(&path);
        if naming::is_event_log(&file_name) {
            continue;
        }

        let content = fs::read_to_string(&path)?;
        match parse_transform_log(&content) {
            Ok(log) => {
                let metadata = StreamMetadata {
                    object_label: naming::object_label(&file_name),
                    source_id: file_name,
                };
                streams.push((log.df, metadata));
            }
            Err(err) => {
                warn!("skipping {file_name}: {err}");
                skipped_files += 1;
            }
        }
    }

    Ok(FeatureInputs {
        streams,
        skipped_files,
    })
}

fn write_cropped_stream(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let mut clone = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut clone)?;
    Ok(())
}
