use serde::Serialize;
use tracing::instrument;

use crate::utils::{
    percentage::{minutes_percentage, Percentage},
    time::MINUTES_PER_DAY,
};

use super::DailyActivityRecord;

/// Usage of a day relative to its quota. Derived from a record and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    /// Not clamped, a day over its quota reports more than 100%.
    pub usage_percentage: Percentage,
    pub is_over_quota: bool,
    pub idle_minutes: u32,
}

impl UsageSummary {
    pub(crate) fn from_minutes(used_minutes: u32, quota_limit_minutes: u32) -> Self {
        debug_assert!(
            used_minutes <= MINUTES_PER_DAY,
            "{used_minutes} minutes don't fit in a day"
        );
        Self {
            usage_percentage: minutes_percentage(used_minutes, quota_limit_minutes),
            // using exactly the quota is still compliant
            is_over_quota: used_minutes > quota_limit_minutes,
            idle_minutes: MINUTES_PER_DAY.saturating_sub(used_minutes),
        }
    }
}

#[instrument(level = "trace", skip(record), fields(date = %record.date()))]
pub fn compute_usage(record: &DailyActivityRecord) -> UsageSummary {
    UsageSummary::from_minutes(record.used_minutes(), record.quota_limit_minutes())
}
