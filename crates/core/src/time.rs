// crates/core/src/time.rs
//! Time normalization: epoch milliseconds → fixed Pacific-time instants.
//!
//! Every hour/weekday bucket in the pipeline is computed in
//! `America/Los_Angeles`, matching the zone the history was recorded
//! against. The zone is fixed, not host-local.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;

use crate::error::RecordError;

/// The fixed zone all bucketing is performed in.
pub const PACIFIC: Tz = Los_Angeles;

/// Convert epoch milliseconds into a Pacific-time instant.
///
/// Values outside chrono's representable range yield
/// `RecordError::InvalidTimestamp`; callers skip the record.
pub fn zoned_from_millis(ms: i64) -> Result<DateTime<Tz>, RecordError> {
    PACIFIC
        .timestamp_millis_opt(ms)
        .single()
        .ok_or(RecordError::InvalidTimestamp)
}

/// Hour of day, 0-23, in Pacific time.
pub fn hour_of_day(dt: &DateTime<Tz>) -> u32 {
    dt.hour()
}

/// ISO weekday index: 0 = Monday .. 6 = Sunday.
pub fn weekday_index(dt: &DateTime<Tz>) -> u32 {
    dt.weekday().num_days_from_monday()
}

/// Weekend = Saturday or Sunday (index >= 5).
pub fn is_weekend(dt: &DateTime<Tz>) -> bool {
    weekday_index(dt) >= 5
}

/// Current instant in the fixed Pacific zone.
pub fn now_pacific() -> DateTime<Tz> {
    chrono::Utc::now().with_timezone(&PACIFIC)
}
