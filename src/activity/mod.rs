//! Interval data model of a single day and everything derived from it.
//! [generator::IntervalGenerator] produces a [DailyActivityRecord], [usage] and [grouping] turn it
//! into the values a dashboard displays.

pub mod generator;
pub mod grouping;
pub mod policy;
pub mod usage;

use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::time::{end_time, slot_timestamp, MINUTES_PER_DAY, SLOT_MINUTES};

pub const QUARTERS_PER_HOUR: usize = 4;
pub const HOURS_PER_DAY: usize = 24;
pub const INTERVALS_PER_DAY: usize = HOURS_PER_DAY * QUARTERS_PER_HOUR;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActivityError {
    #[error("Invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Malformed record: expected {expected} intervals, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    #[error("Malformed record: interval at position {position} is {details}")]
    MisplacedInterval { position: usize, details: String },

    #[error("Invalid timestamp {0:?}, expected HH:MM")]
    InvalidTimestamp(String),

    #[error("Invalid activity profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid quota policy {policy:?}: {reason}")]
    InvalidPolicy { policy: String, reason: String },
}

/// One 15 minute slice of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub id: u8,
    pub hour: u8,
    pub quarter: u8,
    pub is_active: bool,
    /// Start of the slice as `HH:MM`.
    pub timestamp: String,
}

impl Interval {
    /// Creates the interval at position `id` of a day. Hour, quarter and timestamp all follow
    /// from the id.
    pub fn new(id: u8, is_active: bool) -> Self {
        let hour = id / QUARTERS_PER_HOUR as u8;
        let quarter = id % QUARTERS_PER_HOUR as u8;
        Self {
            id,
            hour,
            quarter,
            is_active,
            timestamp: slot_timestamp(hour, quarter),
        }
    }

    pub fn end_time(&self) -> Result<String, ActivityError> {
        end_time(&self.timestamp)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// Text shown when hovering the interval, e.g. `23:45 - 00:00`.
    pub fn time_range(&self) -> Result<String, ActivityError> {
        Ok(format!("{} - {}", self.timestamp, self.end_time()?))
    }

    fn check_position(&self, position: usize) -> Result<(), ActivityError> {
        let expected = Interval::new(position as u8, self.is_active);
        if *self != expected {
            return Err(ActivityError::MisplacedInterval {
                position,
                details: format!(
                    "id {} hour {} quarter {} at {}",
                    self.id, self.hour, self.quarter, self.timestamp
                ),
            });
        }
        Ok(())
    }
}

/// All intervals of a single day together with the quota they are measured against. Once created
/// the record is never changed, a new date always produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivityRecord {
    date: NaiveDate,
    intervals: Vec<Interval>,
    quota_limit_minutes: u32,
    used_minutes: u32,
}

impl DailyActivityRecord {
    /// Validates that `intervals` cover the whole day in order and derives used minutes from them.
    pub fn new(
        date: NaiveDate,
        intervals: Vec<Interval>,
        quota_limit_minutes: u32,
    ) -> Result<Self, ActivityError> {
        ensure_full_day(&intervals)?;
        for (position, interval) in intervals.iter().enumerate() {
            interval.check_position(position)?;
        }
        let used_minutes = active_minutes(&intervals);
        Ok(Self {
            date,
            intervals,
            quota_limit_minutes,
            used_minutes,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn quota_limit_minutes(&self) -> u32 {
        self.quota_limit_minutes
    }

    pub fn used_minutes(&self) -> u32 {
        self.used_minutes
    }

    pub fn active_count(&self) -> usize {
        self.intervals.iter().filter(|v| v.is_active).count()
    }
}

pub(crate) fn ensure_full_day(intervals: &[Interval]) -> Result<(), ActivityError> {
    if intervals.len() != INTERVALS_PER_DAY {
        return Err(ActivityError::MalformedRecord {
            expected: INTERVALS_PER_DAY,
            actual: intervals.len(),
        });
    }
    Ok(())
}

fn active_minutes(intervals: &[Interval]) -> u32 {
    let minutes = intervals.iter().filter(|v| v.is_active).count() as u32 * SLOT_MINUTES;
    debug_assert!(minutes <= MINUTES_PER_DAY);
    minutes
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use super::{DailyActivityRecord, Interval, INTERVALS_PER_DAY};

    pub const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

    /// Record where the first `active` intervals are active.
    pub fn record_with_active(active: usize, quota: u32) -> DailyActivityRecord {
        let intervals = (0..INTERVALS_PER_DAY)
            .map(|id| Interval::new(id as u8, id < active))
            .collect();
        DailyActivityRecord::new(TEST_DATE, intervals, quota).unwrap()
    }
}
