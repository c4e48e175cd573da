use crate::errors::ParserError;
use crate::model::{EventRow, EventTimeline};

use super::schema::{COL_END_TIME, COL_NAME, COL_START_TIME};
use super::{check_row_width, parse_required_f64, required_column_index};

const NAME: &str = "EVENT_LOG";

/// Parses an experiment event log CSV into an [`EventTimeline`].
///
/// Every row becomes an [`EventRow`] in file order, trial and non-trial rows
/// alike; deciding which rows mark trials is left to the segmentation layer.
pub fn parse_event_log(content: &str) -> Result<EventTimeline, ParserError> {
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

    let name_idx = required_column_index(NAME, &header, COL_NAME)?;
    let start_idx = required_column_index(NAME, &header, COL_START_TIME)?;
    let end_idx = required_column_index(NAME, &header, COL_END_TIME)?;
    let required_len = [name_idx, start_idx, end_idx]
        .into_iter()
        .max()
        .unwrap_or(0)
        + 1;

    let mut events = Vec::new();

    for (row_idx, record) in records.enumerate() {
        let record = record.map_err(|err| ParserError::Csv {
            parser: NAME,
            source: err,
        })?;

        let line_index = row_idx + 2; // account for the header row (1-indexed)
        check_row_width(NAME, &record, required_len, line_index)?;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let start_time = parse_required_f64(
            NAME,
            record.get(start_idx).unwrap_or(""),
            line_index,
            COL_START_TIME,
        )?;
        let end_time = parse_required_f64(
            NAME,
            record.get(end_idx).unwrap_or(""),
            line_index,
            COL_END_TIME,
        )?;

        events.push(EventRow {
            name,
            start_time,
            end_time,
        });
    }

    Ok(EventTimeline { events })
}
