// crates/graspflow-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input parsing failed: {0}")]
    Parser(#[from] graspflow_parser::ParserError),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob traversal failed: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("TOML configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration invalid: {0}")]
    Config(String),

    #[error("no event log found in {}", .0.display())]
    MissingEventLog(PathBuf),

    #[error("no feature tables were produced; the input contained no usable streams")]
    EmptyAggregation,

    #[error("Data processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
