use chrono::{DateTime, Utc};

use crate::DurationSinceUnixEpoch;

/// Converts a clock time to a UTC datetime, to compare it with timestamps
/// parsed from documents.
///
/// Returns `None` when the seconds do not fit the range `chrono` supports.
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(duration.as_secs()).ok()?, duration.subsec_nanos())
}
