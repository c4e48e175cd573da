use std::fs;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

/// Provenance sidecar written next to every batch feature table.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub extractor: String,
    pub input_files: usize,
    pub skipped_files: usize,
    pub output_rows: usize,
}

impl RunSummary {
    pub fn new(
        extractor: &str,
        input_files: usize,
        skipped_files: usize,
        output_rows: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            extractor: extractor.to_string(),
            input_files,
            skipped_files,
            output_rows,
        }
    }
}

/// Writes a feature table as CSV with a header row, creating parent
/// directories as needed.
pub fn write_feature_table(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut clone = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut clone)
        .with_context(|| format!("failed to write feature table to {}", path.display()))?;

    Ok(())
}

pub fn write_run_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(summary).context("failed to serialize run summary")?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
