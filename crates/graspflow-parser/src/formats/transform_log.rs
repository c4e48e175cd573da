use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::TransformLog;

use super::schema::{COL_NAME, COL_POS_X, COL_POS_Y, COL_POS_Z, COL_TIMESTAMP};
use super::{check_row_width, parse_required_f64, required_column_index};

const NAME: &str = "TRANSFORM_LOG";

/// Parses a raw position stream CSV into a [`TransformLog`].
///
/// The header must contain `Timestamp`, `Name`, `PosX`, `PosY` and `PosZ`;
/// additional columns (rotation channels and the like) are ignored. Joint
/// names are trimmed. A file with a valid header and no data rows parses to
/// an empty frame.
pub fn parse_transform_log(content: &str) -> Result<TransformLog, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(ParserError::FormatMismatch {
            parser: NAME,
            reason: "file missing header row".to_string(),
        })?
        .map_err(|err| ParserError::Csv {
            parser: NAME,
            source: err,
        })?;

    let ts_idx = required_column_index(NAME, &header, COL_TIMESTAMP)?;
    let name_idx = required_column_index(NAME, &header, COL_NAME)?;
    let x_idx = required_column_index(NAME, &header, COL_POS_X)?;
    let y_idx = required_column_index(NAME, &header, COL_POS_Y)?;
    let z_idx = required_column_index(NAME, &header, COL_POS_Z)?;
    let required_len = [ts_idx, name_idx, x_idx, y_idx, z_idx]
        .into_iter()
        .max()
        .unwrap_or(0)
        + 1;

    let mut timestamps: Vec<f64> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    let mut zs: Vec<f64> = Vec::new();

    for (row_idx, record) in records.enumerate() {
        let record = record.map_err(|err| ParserError::Csv {
            parser: NAME,
            source: err,
        })?;

        let line_index = row_idx + 2; // account for the header row (1-indexed)
        check_row_width(NAME, &record, required_len, line_index)?;

        let joint = record.get(name_idx).unwrap_or("").trim();
        if joint.is_empty() {
            return Err(ParserError::DataRow {
                parser: NAME,
                line_index,
                message: "joint name is empty".to_string(),
            });
        }

        timestamps.push(parse_required_f64(
            NAME,
            record.get(ts_idx).unwrap_or(""),
            line_index,
            COL_TIMESTAMP,
        )?);
        names.push(joint.to_string());
        xs.push(parse_required_f64(
            NAME,
            record.get(x_idx).unwrap_or(""),
            line_index,
            COL_POS_X,
        )?);
        ys.push(parse_required_f64(
            NAME,
            record.get(y_idx).unwrap_or(""),
            line_index,
            COL_POS_Y,
        )?);
        zs.push(parse_required_f64(
            NAME,
            record.get(z_idx).unwrap_or(""),
            line_index,
            COL_POS_Z,
        )?);
    }

    let columns: Vec<Column> = vec![
        Series::new(COL_TIMESTAMP.into(), timestamps).into(),
        Series::new(COL_NAME.into(), names).into(),
        Series::new(COL_POS_X.into(), xs).into(),
        Series::new(COL_POS_Y.into(), ys).into(),
        Series::new(COL_POS_Z.into(), zs).into(),
    ];

    let df = DataFrame::new(columns).map_err(|err| ParserError::Validation {
        parser: NAME,
        message: format!("failed to build position dataframe: {err}"),
    })?;

    Ok(TransformLog { df })
}
