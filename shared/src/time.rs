//! Timestamp parsing and the date arithmetic behind the hour and day windows.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parse an ISO 8601 timestamp carrying a UTC offset, e.g. `2021-04-13T19:00:00+03:00`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z"))
        .ok()
}

/// Minutes to add to local time to reach UTC, the browser's convention (UTC+2 is -120).
pub fn timezone_offset_minutes(offset: &FixedOffset) -> i32 {
    -offset.local_minus_utc() / 60
}

/// Hour of day at which `event` starts for a viewer at `viewer_offset`.
///
/// Uses whole-hour offsets only: the offset is floored to hours before being
/// applied, so half-hour zones shift by the next lower hour.
pub fn local_start_hour(event: &DateTime<FixedOffset>, viewer_offset: &FixedOffset) -> i32 {
    let utc_hour = event.with_timezone(&Utc).hour() as i32;
    let shift = timezone_offset_minutes(viewer_offset).div_euclid(60);
    (utc_hour - shift + 24).rem_euclid(24)
}

/// Whole days from `now` to `event`, rounded to the nearest day with halves going up.
pub fn day_difference(now: &DateTime<FixedOffset>, event: &DateTime<FixedOffset>) -> i64 {
    let millis = event.signed_duration_since(*now).num_milliseconds();
    (millis + MILLIS_PER_DAY / 2).div_euclid(MILLIS_PER_DAY)
}
