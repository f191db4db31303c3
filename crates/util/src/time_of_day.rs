//! # Time-of-day Utilities
//!
//! Listings display start times as `HH:MM AM/PM` while the time slider works
//! in minutes since midnight and the time input emits 24-hour `HH:MM`. These
//! helpers map all of them onto one scale so they can be compared.

use chrono::{NaiveTime, Timelike};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Last representable minute of the day (23:59).
pub const LAST_MINUTE: u32 = MINUTES_PER_DAY - 1;

const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

/// Parses a time of day into minutes since midnight.
///
/// Accepts 12-hour display strings (`09:00 AM`, `1:00pm`) and 24-hour input
/// strings (`13:00`, `13:00:00`). Returns `None` for anything else, including
/// day-part labels such as `Morning`.
///
/// # Example
/// ```rust
/// use localmarket_util::time_of_day::parse_minutes;
///
/// assert_eq!(parse_minutes("01:00 PM"), Some(780));
/// assert_eq!(parse_minutes("13:00"), Some(780));
/// assert_eq!(parse_minutes("Morning"), None);
/// ```
pub fn parse_minutes(input: &str) -> Option<u32> {
    let normalized = input.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .map(|time| time.hour() * 60 + time.minute())
}

/// Formats minutes since midnight as 24-hour `HH:MM`, clamping to `23:59`.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes.min(LAST_MINUTE);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats minutes since midnight as 12-hour `HH:MM AM/PM`, clamping to `11:59 PM`.
pub fn format_minutes_12h(minutes: u32) -> String {
    let minutes = minutes.min(LAST_MINUTE);
    let (hour, minute) = (minutes / 60, minutes % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour:02}:{minute:02} {suffix}")
}
