//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats accepted for post dates, tried in order
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a date string from the post index or front-matter
///
/// Offsets in RFC 3339 strings are normalized to UTC so that dates from
/// different zones compare correctly.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Format a date for display (like "January 15, 2024")
///
/// Strings that are not recognizable dates are shown as they were written.
pub fn format_date(s: &str) -> String {
    match parse_date(s) {
        Some(dt) => dt.format("%B %d, %Y").to_string(),
        None => s.to_string(),
    }
}

/// Format a date as `YYYY-MM-DD`, falling back to the raw string
pub fn short_date(s: &str) -> String {
    match parse_date(s) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}
