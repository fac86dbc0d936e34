use std::{fmt::Display, ops::RangeInclusive};

use chrono::{Datelike, NaiveDate};
use chrono_english::parse_date_string;
use clap::ValueEnum;
use tracing::debug;

use crate::{
    activity::{
        generator::{GeneratorConfig, IntervalGenerator, DEFAULT_QUOTA_LIMIT_MINUTES, DEFAULT_SEED},
        policy::{QuotaPolicy, QuotaRule},
        ActivityError,
    },
    utils::clock::Clock,
};

/// chrono-english reads a bare number such as `15` as a year, anything outside of this is a typo.
const SUPPORTED_YEARS: RangeInclusive<i32> = 1970..=9999;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Options selecting a day and the policy it's generated with. Shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub struct DayOptions {
    #[arg(
        long,
        short,
        help = "Day to display. Examples are \"today\", \"yesterday\", \"15/03/2025\", \"2025-03-15\". Defaults to today"
    )]
    pub date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    pub date_style: DateStyle,
    #[arg(
        long,
        help = "Allowed active minutes per day. With --policy only used for days the policy doesn't mention"
    )]
    pub quota: Option<u32>,
    #[arg(
        long,
        help = "Allowed active minutes per weekday, for example MO-TH90FR120SA-SU180"
    )]
    pub policy: Option<QuotaPolicy>,
    #[arg(long, default_value_t = DEFAULT_SEED, help = "Seed mixed into every generated day")]
    pub seed: u64,
}

impl DayOptions {
    /// Resolves the requested day. The clock is only read here, everything else gets the date
    /// explicitly.
    pub fn resolve_date(&self, clock: &impl Clock) -> Result<NaiveDate, ActivityError> {
        let now = clock.now();
        let Some(input) = &self.date else {
            return Ok(now.date_naive());
        };
        let date = parse_date_string(input, now, self.date_style.into())
            .map(|v| v.date_naive())
            .map_err(|e| ActivityError::InvalidDate {
                input: input.clone(),
                reason: e.to_string(),
            })?;
        if !SUPPORTED_YEARS.contains(&date.year()) {
            return Err(ActivityError::InvalidDate {
                input: input.clone(),
                reason: format!(
                    "year {} is outside of {}..={}",
                    date.year(),
                    SUPPORTED_YEARS.start(),
                    SUPPORTED_YEARS.end()
                ),
            });
        }
        debug!("Resolved {input:?} to {date}");
        Ok(date)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        let fallback = self.quota.unwrap_or(DEFAULT_QUOTA_LIMIT_MINUTES);
        let quota = match &self.policy {
            Some(policy) => QuotaRule::Weekday {
                policy: policy.clone(),
                fallback,
            },
            None => QuotaRule::Fixed(fallback),
        };
        GeneratorConfig {
            quota,
            seed: self.seed,
            ..Default::default()
        }
    }

    pub fn generator(&self) -> IntervalGenerator {
        IntervalGenerator::new(self.generator_config())
    }
}

#[cfg(test)]
mod options_tests {
    use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
    use clap::Parser;

    use crate::{
        activity::{generator::DEFAULT_SEED, policy::QuotaRule, ActivityError},
        utils::clock::MockClock,
    };

    use super::{DateStyle, DayOptions};

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        day: DayOptions,
    }

    fn parse(args: &[&str]) -> DayOptions {
        TestArgs::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .day
    }

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_now().returning(|| {
            Local
                .from_local_datetime(&NaiveDateTime::new(
                    TODAY,
                    NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                ))
                .unwrap()
        });
        clock
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]);
        assert!(matches!(options.date_style, DateStyle::Uk));
        assert_eq!(options.seed, DEFAULT_SEED);
        assert_eq!(options.resolve_date(&clock()).unwrap(), TODAY);
        assert_eq!(options.generator_config().quota, QuotaRule::Fixed(720));
    }

    #[test]
    fn test_relative_and_absolute_dates() {
        let clock = clock();
        assert_eq!(
            parse(&["--date", "yesterday"]).resolve_date(&clock).unwrap(),
            TODAY.pred_opt().unwrap()
        );
        assert_eq!(
            parse(&["--date", "14/03/2025"]).resolve_date(&clock).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert_eq!(
            parse(&["--date", "03/14/2025", "--date-style", "us"])
                .resolve_date(&clock)
                .unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
    }

    #[test]
    fn test_invalid_date_fails() {
        let result = parse(&["--date", "the day after never"]).resolve_date(&clock());
        assert!(matches!(result, Err(ActivityError::InvalidDate { .. })));
    }

    #[test]
    fn test_implausible_year_fails() {
        for input in ["15", "15/03/0015", "15/03/1969"] {
            let result = parse(&["--date", input]).resolve_date(&clock());
            assert!(
                matches!(result, Err(ActivityError::InvalidDate { .. })),
                "{input}"
            );
        }
        assert_eq!(
            parse(&["--date", "01/01/1970"]).resolve_date(&clock()).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_quota_options() {
        let options = parse(&["--quota", "90"]);
        assert_eq!(options.generator_config().quota, QuotaRule::Fixed(90));

        let options = parse(&["--policy", "SA-SU180", "--quota", "60", "--seed", "4"]);
        let config = options.generator_config();
        assert_eq!(config.seed, 4);
        let QuotaRule::Weekday { policy, fallback } = config.quota else {
            panic!("Expected a weekday rule");
        };
        assert_eq!(fallback, 60);
        assert_eq!(policy.allowed_for(TODAY), Some(180));
    }

    #[test]
    fn test_invalid_policy_is_rejected_by_parser() {
        assert!(TestArgs::try_parse_from(["test", "--policy", "XX10"]).is_err());
    }
}
