use serde::Serialize;
use tracing::instrument;

use super::{ensure_full_day, ActivityError, DailyActivityRecord, Interval, QUARTERS_PER_HOUR};

/// The 4 intervals of a single hour, in quarter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour_label: u8,
    pub intervals: [Interval; QUARTERS_PER_HOUR],
}

impl HourBucket {
    pub fn active_count(&self) -> usize {
        self.intervals.iter().filter(|v| v.is_active).count()
    }
}

/// Splits a full day of intervals into 24 hourly buckets. Intervals are neither sorted nor
/// filtered, bucket `h` takes positions `4h..4h+4` as they are. Anything but a full day is
/// rejected instead of producing a ragged last bucket.
#[instrument(level = "trace", skip(intervals), fields(len = intervals.len()))]
pub fn group(intervals: &[Interval]) -> Result<Vec<HourBucket>, ActivityError> {
    ensure_full_day(intervals)?;

    let buckets = intervals
        .chunks_exact(QUARTERS_PER_HOUR)
        .enumerate()
        .map(|(hour, chunk)| HourBucket {
            hour_label: hour as u8,
            intervals: [
                chunk[0].clone(),
                chunk[1].clone(),
                chunk[2].clone(),
                chunk[3].clone(),
            ],
        })
        .collect();
    Ok(buckets)
}

pub fn group_record(record: &DailyActivityRecord) -> Result<Vec<HourBucket>, ActivityError> {
    group(record.intervals())
}

#[cfg(test)]
mod grouping_tests {
    use crate::activity::{
        test_support::record_with_active, ActivityError, Interval, HOURS_PER_DAY,
    };

    use super::{group, group_record};

    #[test]
    fn test_buckets_follow_hours() {
        let record = record_with_active(10, 720);
        let buckets = group_record(&record).unwrap();

        assert_eq!(buckets.len(), HOURS_PER_DAY);
        for (hour, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.hour_label as usize, hour);
            for (quarter, interval) in bucket.intervals.iter().enumerate() {
                assert_eq!(interval.hour as usize, hour);
                assert_eq!(interval.quarter as usize, quarter);
                assert_eq!(interval.id as usize, hour * 4 + quarter);
            }
        }
        assert_eq!(buckets[0].active_count(), 4);
        assert_eq!(buckets[1].active_count(), 4);
        assert_eq!(buckets[2].active_count(), 2);
        assert_eq!(buckets[3].active_count(), 0);
    }

    #[test]
    fn test_short_day_is_rejected() {
        let intervals: Vec<_> = (0..90).map(|id| Interval::new(id, true)).collect();
        assert_eq!(
            group(&intervals),
            Err(ActivityError::MalformedRecord {
                expected: 96,
                actual: 90
            })
        );
    }

    #[test]
    fn test_long_day_is_rejected() {
        let mut intervals: Vec<_> = (0..96).map(|id| Interval::new(id, true)).collect();
        intervals.push(Interval::new(0, false));
        assert!(group(&intervals).is_err());
        assert!(group(&[]).is_err());
    }
}
