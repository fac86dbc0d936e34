use std::{fmt::Display, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};

use super::ActivityError;

const DAY_CODES: [(&str, Weekday); 7] = [
    ("MO", Weekday::Mon),
    ("TU", Weekday::Tue),
    ("WE", Weekday::Wed),
    ("TH", Weekday::Thu),
    ("FR", Weekday::Fri),
    ("SA", Weekday::Sat),
    ("SU", Weekday::Sun),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct PolicyEntry {
    /// Inclusive, Monday based
    first: Weekday,
    last: Weekday,
    minutes: u32,
}

impl PolicyEntry {
    fn contains(&self, day: Weekday) -> bool {
        (self.first.num_days_from_monday()..=self.last.num_days_from_monday())
            .contains(&day.num_days_from_monday())
    }
}

/// Allowed minutes per weekday, written as `MO-TH90FR120SA-SU180`: a day or an inclusive day range
/// followed by the minutes allowed on each of those days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaPolicy {
    source: String,
    entries: Vec<PolicyEntry>,
}

impl QuotaPolicy {
    pub fn parse(policy: &str) -> Result<Self, ActivityError> {
        let error = |reason: String| ActivityError::InvalidPolicy {
            policy: policy.to_string(),
            reason,
        };

        let mut entries = vec![];
        let mut rest = policy.trim();
        while !rest.is_empty() {
            let (first, after) =
                take_day(rest).ok_or_else(|| error(format!("expected a day at {rest:?}")))?;
            rest = after;

            let mut last = first;
            if let Some(after) = rest.strip_prefix('-') {
                let (day, after) = take_day(after)
                    .ok_or_else(|| error(format!("expected a day after '-' at {after:?}")))?;
                if day.num_days_from_monday() < first.num_days_from_monday() {
                    return Err(error(format!("range {first}-{day} runs backwards")));
                }
                last = day;
                rest = after;
            }

            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                return Err(error(format!("missing minutes for {first}")));
            }
            let minutes = rest[..digits]
                .parse::<u32>()
                .map_err(|e| error(format!("minutes for {first}: {e}")))?;
            rest = &rest[digits..];

            entries.push(PolicyEntry {
                first,
                last,
                minutes,
            });
        }

        if entries.is_empty() {
            return Err(error("no policy entries found".into()));
        }
        Ok(Self {
            source: policy.trim().to_string(),
            entries,
        })
    }

    /// Minutes allowed on `date`. When entries overlap the one written first wins.
    pub fn allowed_for(&self, date: NaiveDate) -> Option<u32> {
        let day = date.weekday();
        self.entries
            .iter()
            .find(|entry| entry.contains(day))
            .map(|entry| entry.minutes)
    }

    /// Days without an entry allow nothing.
    pub fn is_within_policy(&self, date: NaiveDate, active_minutes: u32) -> bool {
        active_minutes <= self.allowed_for(date).unwrap_or(0)
    }
}

fn take_day(value: &str) -> Option<(Weekday, &str)> {
    DAY_CODES
        .iter()
        .find(|(code, _)| value.starts_with(code))
        .map(|(code, day)| (*day, &value[code.len()..]))
}

impl FromStr for QuotaPolicy {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuotaPolicy::parse(s)
    }
}

impl Display for QuotaPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Decides the quota a generated day is measured against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaRule {
    Fixed(u32),
    /// Days missing from the policy fall back to `fallback`.
    Weekday { policy: QuotaPolicy, fallback: u32 },
}

impl QuotaRule {
    pub fn quota_for(&self, date: NaiveDate) -> u32 {
        match self {
            QuotaRule::Fixed(minutes) => *minutes,
            QuotaRule::Weekday { policy, fallback } => {
                policy.allowed_for(date).unwrap_or(*fallback)
            }
        }
    }
}
