use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use graspflow_core::aggregate::aggregate_features;
use graspflow_core::config::PipelineConfig;
use graspflow_core::extractors::{ApertureExtractor, FeatureExtractor, PolygonFeatureExtractor};
use graspflow_core::outputs::{write_feature_table, write_run_summary, RunSummary};
use graspflow_core::session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grasping experiment feature extraction pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop raw position streams into per-trial segments
    Segment(SegmentArgs),
    /// Compute a combined feature table from segmented streams
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct SegmentArgs {
    /// Directory holding one subdirectory per subject
    #[arg(long)]
    input: PathBuf,

    /// Directory to write per-subject segment directories into
    #[arg(long)]
    output: PathBuf,

    /// TOML pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the trailing window buffer in seconds
    #[arg(long)]
    time_buffer: Option<f64>,

    /// Segment a single subject instead of the whole input directory
    #[arg(long)]
    subject: Option<String>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Directory of segmented position streams
    #[arg(long)]
    input: PathBuf,

    /// Path of the combined feature table CSV
    #[arg(long)]
    output: PathBuf,

    /// Which feature family to compute
    #[arg(long, value_enum)]
    feature: FeatureKind,

    /// TOML pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FeatureKind {
    Aperture,
    Polygon,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Segment(args) => run_segment(args),
        Command::Extract(args) => run_extract(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn run_segment(args: SegmentArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(buffer) = args.time_buffer {
        config.segmentation.time_buffer_s = buffer;
        config.validate()?;
    }
    let time_buffer = config.segmentation.time_buffer_s;

    if let Some(subject) = args.subject {
        let subject_dir = args.input.join(&subject);
        let output_dir = args.output.join(&subject);
        let report = session::extract_subject(&subject_dir, &output_dir, time_buffer)
            .with_context(|| format!("failed to segment subject {subject}"))?;
        info!(
            "segmented {subject}: {} trials extracted, {} skipped",
            report.extracted.len(),
            report.skipped.len()
        );
        return Ok(());
    }

    let report = session::extract_all_subjects(&args.input, &args.output, &config)?;
    info!(
        "segmentation finished: {} subjects completed, {} failed",
        report.completed(),
        report.failed()
    );
    if report.completed() == 0 {
        bail!("no subject could be segmented");
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    let inputs = session::collect_feature_inputs(&args.input)
        .with_context(|| format!("failed to gather streams from {}", args.input.display()))?;

    let extractor: Box<dyn FeatureExtractor> = match args.feature {
        FeatureKind::Aperture => Box::new(ApertureExtractor::new(
            config.aperture.joint_a,
            config.aperture.joint_b,
        )),
        FeatureKind::Polygon => Box::new(PolygonFeatureExtractor::new(config.polygon.groups)),
    };

    let table = aggregate_features(&inputs.streams, extractor.as_ref())
        .context("feature aggregation failed")?;

    write_feature_table(&table, &args.output)?;

    let summary = RunSummary::new(
        extractor.code_identifier(),
        inputs.streams.len(),
        inputs.skipped_files,
        table.height(),
    );
    write_run_summary(&summary, &args.output.with_extension("meta.json"))?;

    info!(
        "wrote {} feature rows to {} ({} streams, {} files skipped)",
        table.height(),
        args.output.display(),
        inputs.streams.len(),
        inputs.skipped_files
    );
    Ok(())
}
