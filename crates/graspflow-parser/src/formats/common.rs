use csv::StringRecord;

use crate::errors::ParserError;

/// Locates a required column in the header row by exact name (surrounding
/// whitespace ignored). Extra columns in the file are tolerated; a missing
/// required column rejects the file.
pub(crate) fn required_column_index(
    parser: &'static str,
    header: &StringRecord,
    name: &str,
) -> Result<usize, ParserError> {
    header
        .iter()
        .position(|field| field.trim() == name)
        .ok_or_else(|| ParserError::FormatMismatch {
            parser,
            reason: format!("missing required column '{name}'"),
        })
}

pub(crate) fn check_row_width(
    parser: &'static str,
    record: &StringRecord,
    required_len: usize,
    line_index: usize,
) -> Result<(), ParserError> {
    if record.len() < required_len {
        return Err(ParserError::DataRow {
            parser,
            line_index,
            message: format!(
                "expected at least {required_len} columns but found {}",
                record.len()
            ),
        });
    }
    Ok(())
}

pub(crate) fn parse_required_f64(
    parser: &'static str,
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<f64, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParserError::DataRow {
            parser,
            line_index,
            message: format!("column '{column}' is empty"),
        });
    }
    trimmed
        .parse::<f64>()
        .map_err(|err| ParserError::DataRow {
            parser,
            line_index,
            message: format!("failed to parse column '{column}' as float: {err}"),
        })
}
