//! Task record model parsed from a single note line

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// How a range whose end precedes its start is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MidnightPolicy {
    /// The range crosses midnight: `23:30 - 00:15` is 45 minutes (default)
    #[default]
    Wrap,
    /// The range is treated as mis-encoded and counts as zero hours
    Zero,
}

impl std::fmt::Display for MidnightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MidnightPolicy::Wrap => write!(f, "wrap"),
            MidnightPolicy::Zero => write!(f, "zero"),
        }
    }
}

/// Wall-clock interval within a day, minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Length of the range in whole minutes
    ///
    /// When `end < start` the result depends on `policy`; identical start and
    /// end always yield zero.
    pub fn duration_minutes(&self, policy: MidnightPolicy) -> u64 {
        let delta = self.end.signed_duration_since(self.start);

        let delta = if self.crosses_midnight() {
            match policy {
                MidnightPolicy::Wrap => delta + TimeDelta::hours(24),
                MidnightPolicy::Zero => TimeDelta::zero(),
            }
        } else {
            delta
        };

        u64::try_from(delta.num_minutes()).unwrap_or(0)
    }

    /// Length of the range in fractional hours, never negative
    pub fn duration_hours(&self, policy: MidnightPolicy) -> f64 {
        self.duration_minutes(policy) as f64 / 60.0
    }

    /// Whether the end lies before the start on the same nominal day
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// One checkbox task line: status, time range and category tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub completed: bool,
    pub time_range: TimeRange,
    /// Tag text without the leading `#`
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_duration_same_day() {
        let range = TimeRange::new(hm(9, 0), hm(10, 30));
        assert_eq!(range.duration_hours(MidnightPolicy::Wrap), 1.5);
        assert_eq!(range.duration_hours(MidnightPolicy::Zero), 1.5);
    }

    #[test]
    fn test_duration_empty_range() {
        let range = TimeRange::new(hm(12, 0), hm(12, 0));
        assert_eq!(range.duration_hours(MidnightPolicy::Wrap), 0.0);
        assert!(!range.crosses_midnight());
    }

    #[test]
    fn test_duration_crossing_midnight_wraps() {
        let range = TimeRange::new(hm(23, 30), hm(0, 15));
        assert!(range.crosses_midnight());
        assert_eq!(range.duration_minutes(MidnightPolicy::Wrap), 45);
        assert_eq!(range.duration_hours(MidnightPolicy::Wrap), 0.75);
    }

    #[test]
    fn test_duration_crossing_midnight_zero_policy() {
        let range = TimeRange::new(hm(22, 0), hm(1, 0));
        assert_eq!(range.duration_hours(MidnightPolicy::Zero), 0.0);
    }

    #[test]
    fn test_time_range_display() {
        let range = TimeRange::new(hm(7, 5), hm(8, 0));
        assert_eq!(range.to_string(), "07:05 - 08:00");
    }

    #[test]
    fn test_midnight_policy_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: MidnightPolicy,
        }

        let parsed: Wrapper = toml::from_str("policy = \"zero\"").unwrap();
        assert_eq!(parsed.policy, MidnightPolicy::Zero);
        assert_eq!(MidnightPolicy::default(), MidnightPolicy::Wrap);
    }
}
