//! Lock threshold and selection horizon for availability edits.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Signed number of whole days from `today` to `date`.
///
/// Negative when `date` lies in the past.
pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Which product screen's rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Schedule management screen: three months ahead.
    #[default]
    Calendar,
    /// Availability step of driver sign-up: two weeks ahead.
    Signup,
}

impl Flow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Signup => "signup",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calendar" => Ok(Self::Calendar),
            "signup" => Ok(Self::Signup),
            _ => Err(ValidationError::UnknownVariant {
                kind: "flow",
                value: s.to_string(),
            }),
        }
    }
}

/// Rules gating which dates may be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPolicy {
    lock_days: u32,
    horizon_days: u32,
}

impl AvailabilityPolicy {
    /// Days before a date at which its availability freezes.
    pub const DEFAULT_LOCK_DAYS: u32 = 3;

    /// Schedule management screen: 3-day lock, 90-day horizon.
    pub const CALENDAR: Self = Self {
        lock_days: Self::DEFAULT_LOCK_DAYS,
        horizon_days: 90,
    };

    /// Sign-up availability step: 3-day lock, 14-day horizon.
    pub const SIGNUP: Self = Self {
        lock_days: Self::DEFAULT_LOCK_DAYS,
        horizon_days: 14,
    };

    /// Longest accepted horizon, about five years.
    pub const MAX_HORIZON_DAYS: u32 = 1825;

    /// Creates a policy. The lock threshold must not exceed the horizon,
    /// otherwise no date could ever be committed.
    pub fn new(lock_days: u32, horizon_days: u32) -> Result<Self, ValidationError> {
        if horizon_days > Self::MAX_HORIZON_DAYS {
            return Err(ValidationError::HorizonTooLong {
                horizon_days,
                max_days: Self::MAX_HORIZON_DAYS,
            });
        }
        if lock_days > horizon_days {
            return Err(ValidationError::PolicyRange {
                lock_days,
                horizon_days,
            });
        }
        Ok(Self {
            lock_days,
            horizon_days,
        })
    }

    /// Preset for a flow.
    pub const fn for_flow(flow: Flow) -> Self {
        match flow {
            Flow::Calendar => Self::CALENDAR,
            Flow::Signup => Self::SIGNUP,
        }
    }

    pub const fn lock_days(&self) -> u32 {
        self.lock_days
    }

    pub const fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Whether `date` is far enough ahead of `today` to be edited.
    pub fn is_editable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        days_between(today, date) >= i64::from(self.lock_days)
    }

    /// Whether `date` lies inside `today ..= today + horizon`.
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        (0..=i64::from(self.horizon_days)).contains(&days_between(today, date))
    }

    /// First and last selectable dates, inclusive.
    pub fn selectable_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today, add_days(today, self.horizon_days))
    }

    /// Earliest date that can still be edited.
    pub fn first_editable(&self, today: NaiveDate) -> NaiveDate {
        add_days(today, self.lock_days)
    }
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        Self::CALENDAR
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_between_is_signed() {
        let today = date(2024, 1, 15);
        assert_eq!(days_between(today, date(2024, 1, 18)), 3);
        assert_eq!(days_between(today, today), 0);
        assert_eq!(days_between(today, date(2024, 1, 10)), -5);
        assert_eq!(days_between(today, date(2024, 3, 1)), 46);
    }

    #[test]
    fn rejects_lock_beyond_horizon() {
        assert_eq!(
            AvailabilityPolicy::new(10, 7),
            Err(ValidationError::PolicyRange {
                lock_days: 10,
                horizon_days: 7
            })
        );
        assert!(AvailabilityPolicy::new(7, 7).is_ok());
    }

    #[test]
    fn rejects_horizon_past_maximum() {
        assert_eq!(
            AvailabilityPolicy::new(3, 4_000_000_000),
            Err(ValidationError::HorizonTooLong {
                horizon_days: 4_000_000_000,
                max_days: AvailabilityPolicy::MAX_HORIZON_DAYS
            })
        );
        let widest = AvailabilityPolicy::new(3, AvailabilityPolicy::MAX_HORIZON_DAYS).unwrap();
        let today = date(2024, 1, 15);
        assert_eq!(widest.selectable_range(today).1, date(2029, 1, 13));
    }

    #[test]
    fn presets_differ_only_in_horizon() {
        let calendar = AvailabilityPolicy::for_flow(Flow::Calendar);
        let signup = AvailabilityPolicy::for_flow(Flow::Signup);
        assert_eq!(calendar.lock_days(), signup.lock_days());
        assert_eq!(calendar.horizon_days(), 90);
        assert_eq!(signup.horizon_days(), 14);
    }

    #[test]
    fn selectable_range_is_inclusive() {
        let today = date(2024, 1, 15);
        let policy = AvailabilityPolicy::SIGNUP;
        assert_eq!(policy.selectable_range(today), (today, date(2024, 1, 29)));
        assert!(policy.is_selectable(date(2024, 1, 29), today));
        assert!(!policy.is_selectable(date(2024, 1, 30), today));
        assert!(!policy.is_selectable(date(2024, 1, 14), today));
        assert_eq!(policy.first_editable(today), date(2024, 1, 18));
    }

    #[test]
    fn zero_lock_still_excludes_past() {
        let policy = AvailabilityPolicy::new(0, 30).unwrap();
        let today = date(2024, 1, 15);
        assert!(policy.is_editable(today, today));
        assert!(!policy.is_editable(date(2024, 1, 14), today));
    }

    #[test]
    fn flow_parses() {
        assert_eq!("signup".parse::<Flow>().unwrap(), Flow::Signup);
        assert_eq!(Flow::default(), Flow::Calendar);
        assert!("weekly".parse::<Flow>().is_err());
    }
}
