//! Wire format for date values.
//!
//! Dates are written as `yyyy-MM-dd'T'HH:mm:ssZ` in UTC, for example
//! `1978-02-12T12:00:00+0000`. Reading also accepts the legacy
//! `yyyy-MM-dd HH:mm:ss` form, interpreted as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Primary pattern, used for both writing and reading.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Legacy pattern without offset, accepted on read only.
pub const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a date with the primary pattern. Sub-second precision is dropped.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date, trying the primary pattern first and then the legacy one.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_str(s, DATE_FORMAT) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, LEGACY_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
