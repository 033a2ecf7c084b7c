/// Calendar day format used in the log and on the command line: "2025-06-04"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format for the start/end columns: "2025-06-04 09:15:00"
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time-of-day format for day listings
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

/// First line of every log file
pub(crate) const LOG_HEADER: &str = "date,start_time,end_time,duration_minutes,tag,description";

/// Minutes of focus a day needs to count toward the streak
pub(crate) const DEFAULT_DAILY_GOAL: i64 = 120;

/// Days shown by `history` when --days is not given
pub(crate) const DEFAULT_HISTORY_DAYS: u32 = 7;
