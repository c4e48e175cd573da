pub mod errors;
pub mod formats;
pub mod model;

pub use errors::ParserError;
pub use formats::{parse_event_log, parse_transform_log};
pub use model::{EventRow, EventTimeline, TransformLog, TrialId};
