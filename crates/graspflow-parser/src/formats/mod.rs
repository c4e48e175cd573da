mod common;
mod event_log;
pub(crate) mod schema;
mod transform_log;

pub use event_log::parse_event_log;
pub use transform_log::parse_transform_log;

pub(crate) use common::{check_row_width, parse_required_f64, required_column_index};
