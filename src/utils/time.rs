use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::activity::ActivityError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const SLOT_MINUTES: u32 = 15;

const TIMESTAMP_FORMAT: &str = "%H:%M";

/// This is the standard way of converting a date to a string in dayquota.
pub fn date_to_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short weekday followed by [date_to_label], e.g. `Sat 2025-03-15`.
pub fn weekday_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%a"), date_to_label(date))
}

/// Date as a dashboard heading shows it, e.g. `Sat, Mar 15 2025`.
pub fn date_heading(date: NaiveDate) -> String {
    date.format("%a, %b %-d %Y").to_string()
}

/// Formats minutes as `{h}h {m}m`. No rounding happens, 45 minutes is `0h 45m`.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Start of a 15 minute slot as `HH:MM`.
pub fn slot_timestamp(hour: u8, quarter: u8) -> String {
    format!("{:02}:{:02}", hour, u32::from(quarter) * SLOT_MINUTES)
}

pub fn hour_label(hour: u8) -> String {
    format!("{hour:02}:00")
}

pub fn parse_timestamp(timestamp: &str) -> Result<NaiveTime, ActivityError> {
    NaiveTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|_| ActivityError::InvalidTimestamp(timestamp.to_string()))
}

/// Returns the end of the slot starting at `start`. Times wrap around midnight, so the slot
/// starting at `23:45` ends at `00:00`.
pub fn end_time(start: &str) -> Result<String, ActivityError> {
    let start = parse_timestamp(start)?;
    // NaiveTime addition wraps at midnight
    let end = start + Duration::minutes(SLOT_MINUTES.into());
    Ok(format!("{:02}:{:02}", end.hour(), end.minute()))
}
