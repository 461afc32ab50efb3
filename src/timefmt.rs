//! Relative "time ago" labels for feed items.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Parse the backend's ISO-8601 text. Offsets are honoured; a naive
/// timestamp is taken as UTC and a bare date as UTC midnight.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|n| n.and_utc())
}

/// `Just now` / `{N}h ago` / `{N}d ago` / `Mon D`, with floored hour and day
/// counts. Future timestamps read as `Just now`.
pub fn format_relative(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(created_at) else {
        return "Invalid Date".to_string();
    };

    let diff_ms = (now - date).num_milliseconds();
    let hours = diff_ms.div_euclid(MS_PER_HOUR);
    let days = diff_ms.div_euclid(MS_PER_DAY);

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        date.format("%b %-d").to_string()
    }
}

/// [`format_relative`] against the wall clock.
pub fn format_relative_now(created_at: &str) -> String {
    format_relative(created_at, Utc::now())
}
