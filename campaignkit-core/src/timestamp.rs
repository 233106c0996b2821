//! UTC timestamp formatting and local date/time resolution.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

/// ISO-8601 with millisecond precision, e.g. `2024-01-01T10:00:00.000Z`.
pub fn iso_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Compact UTC form used by Google, Yahoo and iCalendar: `20240101T100000Z`.
///
/// Equivalent to [`iso_utc`] with `-`, `:` and the fractional seconds removed.
pub fn compact_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Interpret a wall-clock date/time in `tz` and return the UTC instant.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant.
/// Times inside a gap (clocks going forward) are pushed forward by the
/// length of the gap, so 02:30 on a spring-forward night becomes 03:30.
pub fn local_to_utc<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return dt.with_timezone(&Utc);
    }

    // Gaps are at most a couple of hours; step back to the last valid
    // wall-clock time before it and carry the offset forward.
    for back in 1..=3 {
        let shift = Duration::hours(back);
        if let Some(dt) = tz.from_local_datetime(&(*naive - shift)).earliest() {
            return (dt + shift).with_timezone(&Utc);
        }
    }

    naive.and_utc()
}
