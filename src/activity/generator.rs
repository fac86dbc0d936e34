use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use super::{
    policy::QuotaRule, ActivityError, DailyActivityRecord, Interval, HOURS_PER_DAY,
    INTERVALS_PER_DAY, QUARTERS_PER_HOUR,
};

pub const DEFAULT_QUOTA_LIMIT_MINUTES: u32 = 12 * 60;
pub const DEFAULT_SEED: u64 = 0x5eed_da7a;

/// Probability of an interval being active, per hour of the day.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProfile {
    hourly: [f64; HOURS_PER_DAY],
}

impl ActivityProfile {
    /// Profile where every hour is idle.
    pub fn idle() -> Self {
        Self {
            hourly: [0.; HOURS_PER_DAY],
        }
    }

    /// Sets the probability for an inclusive range of hours.
    pub fn with_band(
        mut self,
        hours: RangeInclusive<u8>,
        probability: f64,
    ) -> Result<Self, ActivityError> {
        if !(0. ..=1.).contains(&probability) {
            return Err(ActivityError::InvalidProfile(format!(
                "probability {probability} is outside of 0..=1"
            )));
        }
        if hours.is_empty() || usize::from(*hours.end()) >= HOURS_PER_DAY {
            return Err(ActivityError::InvalidProfile(format!(
                "hours {}..={} don't fit in a day",
                hours.start(),
                hours.end()
            )));
        }
        for hour in hours {
            self.hourly[usize::from(hour)] = probability;
        }
        Ok(self)
    }

    pub fn probability(&self, hour: u8) -> f64 {
        self.hourly[usize::from(hour)]
    }
}

impl Default for ActivityProfile {
    /// Idle at night, mostly active during business hours, sometimes active in the evening.
    fn default() -> Self {
        let mut hourly = [0.; HOURS_PER_DAY];
        hourly[8..=18].fill(0.7);
        hourly[19..=23].fill(0.4);
        Self { hourly }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub quota: QuotaRule,
    pub profile: ActivityProfile,
    /// Mixed with the date, so the same seed always produces the same day.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            quota: QuotaRule::Fixed(DEFAULT_QUOTA_LIMIT_MINUTES),
            profile: ActivityProfile::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Produces the intervals of a day. Activity is pseudo random but keyed by the date, generating
/// the same date twice gives the same record.
#[derive(Debug, Clone, Default)]
pub struct IntervalGenerator {
    config: GeneratorConfig,
}

impl IntervalGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn generate(&self, date: NaiveDate) -> Result<DailyActivityRecord, ActivityError> {
        let mut rng = self.rng_for(date);

        let intervals = (0..INTERVALS_PER_DAY)
            .map(|id| {
                let hour = (id / QUARTERS_PER_HOUR) as u8;
                let probability = self.config.profile.probability(hour);
                let is_active = probability > 0. && rng.gen_bool(probability);
                Interval::new(id as u8, is_active)
            })
            .collect::<Vec<_>>();

        let record =
            DailyActivityRecord::new(date, intervals, self.config.quota.quota_for(date))?;
        debug!(
            "Generated {} with {} of {} minutes used",
            record.date(),
            record.used_minutes(),
            record.quota_limit_minutes()
        );
        Ok(record)
    }

    /// Same as [IntervalGenerator::generate] for an ISO `YYYY-MM-DD` date.
    pub fn generate_from_str(&self, date: &str) -> Result<DailyActivityRecord, ActivityError> {
        self.generate(parse_reference_date(date)?)
    }

    /// The stream depends only on the seed, not on the `rand` version.
    fn rng_for(&self, date: NaiveDate) -> ChaCha8Rng {
        let day = date.num_days_from_ce() as i64 as u64;
        ChaCha8Rng::seed_from_u64(self.config.seed ^ day.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }
}

/// Parses an ISO `YYYY-MM-DD` date. Nothing is defaulted, an empty or broken value is an error.
pub fn parse_reference_date(input: &str) -> Result<NaiveDate, ActivityError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ActivityError::InvalidDate {
            input: input.to_string(),
            reason: "date is empty".into(),
        });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| ActivityError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
