pub const COL_TIMESTAMP: &str = "Timestamp";
pub const COL_NAME: &str = "Name";
pub const COL_POS_X: &str = "PosX";
pub const COL_POS_Y: &str = "PosY";
pub const COL_POS_Z: &str = "PosZ";

pub const COL_START_TIME: &str = "StartTime";
pub const COL_END_TIME: &str = "EndTime";

pub const POSITION_COLUMNS: [&str; 5] = [COL_TIMESTAMP, COL_NAME, COL_POS_X, COL_POS_Y, COL_POS_Z];

pub const EVENT_COLUMNS: [&str; 3] = [COL_NAME, COL_START_TIME, COL_END_TIME];
