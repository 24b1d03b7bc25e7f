//! Lenient date/time parsing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Years outside this range come from a layout that split the year digits.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Formats carrying both a date and a time of day.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only formats, read as midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Month-and-year layouts, read as the first of the month.
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%B %Y", "%b %Y", "%m/%Y"];

/// Parse a string into a calendar date/time.
///
/// Returns `None` for text that matches no known layout and for layouts with
/// impossible calendar values such as month 13 or day 45.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_any(trimmed).filter(|dt| YEAR_RANGE.contains(&dt.year()))
}

fn parse_any(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    if let Some(date) = parse_digits(text) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .filter(|dt| YEAR_RANGE.contains(&dt.year()))
    {
        return Some(dt);
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|format| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .filter(|d| YEAR_RANGE.contains(&d.year()))
        })
        .or_else(|| {
            let padded = format!("{} 01", text);
            MONTH_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(&padded, &format!("{} %d", format)).ok()
            })
        })?;
    Some(date.and_time(NaiveTime::MIN))
}

/// Compact all-digit layouts: `YYYY` and `YYYYMMDD`.
fn parse_digits(text: &str) -> Option<NaiveDate> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let part = |range: std::ops::Range<usize>| text[range].parse::<u32>().ok();
    match text.len() {
        4 => NaiveDate::from_ymd_opt(part(0..4)? as i32, 1, 1),
        8 => NaiveDate::from_ymd_opt(part(0..4)? as i32, part(4..6)?, part(6..8)?),
        _ => None,
    }
}
