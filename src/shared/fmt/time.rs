//! Date and time labels.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Chart x-axis label. A one-day range shows the time of day; longer ranges
/// show the calendar day.
pub fn format_chart_date(instant: &NaiveDateTime, days: u32) -> String {
    if days == 1 {
        instant.format("%I:%M %p").to_string()
    } else {
        instant.format("%b %-d").to_string()
    }
}

/// Text for the last-update field, e.g. `02:30:45 PM`.
pub fn format_update_time(instant: &NaiveDateTime) -> String {
    instant.format("%I:%M:%S %p").to_string()
}

/// Parses the ISO-ish timestamps the history endpoint emits.
///
/// Naive timestamps are taken as local wall-clock time; timestamps with an
/// offset are converted to local time.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
