//! Work-day keys.
//!
//! A work day starts at `reset_hour` local time instead of midnight, so a
//! session that runs past midnight is still credited to the day it began.

use chrono::{Duration, NaiveDateTime};

/// Format of day scope names in the ledger.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Latest accepted `reset_hour`.
pub const MAX_RESET_HOUR: u32 = 24;

/// Returns the `YYYY-MM-DD` work day that `wall_time` belongs to.
pub fn day_key(wall_time: NaiveDateTime, reset_hour: u32) -> String {
    let offset = Duration::hours(i64::from(reset_hour.min(MAX_RESET_HOUR)));
    wall_time
        .checked_sub_signed(offset)
        .unwrap_or(wall_time)
        .date()
        .format(DAY_KEY_FORMAT)
        .to_string()
}

/// True if `scope` is shaped like a day key.
pub fn is_day_key(scope: &str) -> bool {
    chrono::NaiveDate::parse_from_str(scope, DAY_KEY_FORMAT).is_ok() && scope.len() == 10
}
