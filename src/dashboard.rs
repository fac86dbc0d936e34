//! The day currently displayed by a dashboard. A [Dashboard] is never changed, navigating produces
//! a new one for the new date.

use std::fmt::Display;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use tracing::{info, instrument};

use crate::activity::{
    generator::IntervalGenerator,
    grouping::{group_record, HourBucket},
    usage::{compute_usage, UsageSummary},
    ActivityError, DailyActivityRecord, Interval,
};

pub const RESET_LABEL: &str = "Resets at 00:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaStatus {
    WithinLimits,
    QuotaExceeded,
}

impl Display for QuotaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotaStatus::WithinLimits => write!(f, "WITHIN LIMITS"),
            QuotaStatus::QuotaExceeded => write!(f, "QUOTA EXCEEDED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    To(NaiveDate),
}

/// What a hover over an interval shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub time_range: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub record: DailyActivityRecord,
    pub summary: UsageSummary,
    pub buckets: Vec<HourBucket>,
}

impl Dashboard {
    #[instrument(level = "debug", skip(generator))]
    pub fn load(generator: &IntervalGenerator, date: NaiveDate) -> Result<Self, ActivityError> {
        let record = generator.generate(date)?;
        let summary = compute_usage(&record);
        let buckets = group_record(&record)?;
        Ok(Self {
            date,
            record,
            summary,
            buckets,
        })
    }

    /// Loads the dashboard for the date navigation leads to. The current dashboard stays as it is.
    pub fn navigate(
        &self,
        generator: &IntervalGenerator,
        navigation: Navigation,
    ) -> Result<Self, ActivityError> {
        let date = match navigation {
            Navigation::Previous => self.date.pred_opt(),
            Navigation::Next => self.date.succ_opt(),
            Navigation::To(date) => Some(date),
        }
        .ok_or_else(|| ActivityError::InvalidDate {
            input: format!("{navigation:?} from {}", self.date),
            reason: "date is out of range".into(),
        })?;
        info!("Navigating from {} to {date}", self.date);
        Dashboard::load(generator, date)
    }

    pub fn quota_status(&self) -> QuotaStatus {
        if self.summary.is_over_quota {
            QuotaStatus::QuotaExceeded
        } else {
            QuotaStatus::WithinLimits
        }
    }

    /// Width of the quota progress bar in percents.
    pub fn progress_width(&self) -> u8 {
        self.summary.usage_percentage.clamped()
    }

    pub fn reset_label(&self) -> &'static str {
        RESET_LABEL
    }

    pub fn tooltip(interval: &Interval) -> Result<Tooltip, ActivityError> {
        Ok(Tooltip {
            time_range: interval.time_range()?,
            status: interval.status_label(),
        })
    }
}

/// Dashboards for Monday to Sunday of the week `date` belongs to.
#[instrument(level = "debug", skip(generator))]
pub fn week_overview(
    generator: &IntervalGenerator,
    date: NaiveDate,
) -> Result<Vec<Dashboard>, ActivityError> {
    let out_of_range = || ActivityError::InvalidDate {
        input: date.to_string(),
        reason: "week is out of range".into(),
    };
    let monday = date
        .checked_sub_signed(Duration::days(
            date.weekday().num_days_from_monday().into(),
        ))
        .ok_or_else(out_of_range)?;

    (0..7)
        .map(|offset| {
            let day = monday
                .checked_add_signed(Duration::days(offset))
                .ok_or_else(out_of_range)?;
            Dashboard::load(generator, day)
        })
        .collect()
}
