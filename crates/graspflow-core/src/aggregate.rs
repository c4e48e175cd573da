use polars::prelude::*;

use crate::error::{PipelineError, Result};
use crate::extractors::FeatureExtractor;

/// Labels attached to every row a stream contributes to the batch table.
#[derive(Debug, Clone)]
pub struct StreamMetadata {
    pub object_label: String,
    pub source_id: String,
}

/// Runs one extractor across a batch of streams and stacks the per-stream
/// tables into a single labelled table. Each row carries its stream's object
/// label under `Object` and its stream id under `ConfigFile`.
pub fn aggregate_features(
    streams: &[(DataFrame, StreamMetadata)],
    extractor: &dyn FeatureExtractor,
) -> Result<DataFrame> {
    let mut frames: Vec<DataFrame> = Vec::with_capacity(streams.len());

    for (df, metadata) in streams {
        let features = extractor.extract(df)?;
        let rows = features.height();
        let mut columns = features.get_columns().to_vec();
        columns.push(
            Series::new(
                "Object".into(),
                vec![metadata.object_label.as_str(); rows],
            )
            .into(),
        );
        columns.push(
            Series::new(
                "ConfigFile".into(),
                vec![metadata.source_id.as_str(); rows],
            )
            .into(),
        );
        frames.push(DataFrame::new(columns)?);
    }

    if frames.is_empty() {
        return Err(PipelineError::EmptyAggregation);
    }

    let mut iter = frames.into_iter();
    let mut combined = iter.next().expect("at least one feature frame");
    for frame in iter {
        combined.vstack_mut(&frame)?;
    }

    Ok(combined)
}
