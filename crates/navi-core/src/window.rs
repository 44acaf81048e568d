//! Whole-hour times of day and the working windows built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// A time of day on a whole hour, `00:00` through `23:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u8);

impl TimeOfDay {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a time from an hour in `0..=23`.
    pub fn from_hour(hour: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::InvalidTime {
                value: format!("{hour}:00"),
            });
        }
        Ok(Self(hour))
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) || minute != "00" {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        Self::from_hour(hour).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One committed working interval for a single calendar date.
///
/// An `end` earlier than `start` is an overnight shift that finishes on the
/// following day. Zero-length windows cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct AvailabilityWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl AvailabilityWindow {
    /// Creates a window, rejecting `start == end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if start == end {
            return Err(ValidationError::EmptyWindow {
                at: start.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from `HH:00` start and end strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(start.parse()?, end.parse()?)
    }

    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether the window runs past midnight.
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// Length of the window in whole hours.
    pub fn hours(&self) -> u8 {
        if self.is_overnight() {
            24 - self.start.hour() + self.end.hour()
        } else {
            self.end.hour() - self.start.hour()
        }
    }
}

impl fmt::Display for AvailabilityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawWindow> for AvailabilityWindow {
    type Error = ValidationError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<AvailabilityWindow> for RawWindow {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

/// Preferred time slots offered during sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPreset {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl ShiftPreset {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// The window this slot covers.
    pub const fn window(self) -> AvailabilityWindow {
        let (start, end) = match self {
            Self::Morning => (6, 12),
            Self::Afternoon => (12, 18),
            Self::Evening => (18, 0),
            Self::Night => (0, 6),
        };
        AvailabilityWindow {
            start: TimeOfDay(start),
            end: TimeOfDay(end),
        }
    }
}

impl fmt::Display for ShiftPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftPreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "shift preset",
                value: s.to_string(),
            })
    }
}
