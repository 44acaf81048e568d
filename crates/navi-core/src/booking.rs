//! Ride bookings assigned to a driver.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::{BookingId, Cents, ValidationError};

/// Tier of ride the passenger booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLevel {
    Standard,
    Premium,
}

/// Lifecycle of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// The bookings tab this status is listed under.
    pub const fn tab(self) -> BookingTab {
        match self {
            Self::Completed | Self::Cancelled => BookingTab::Past,
            Self::Confirmed => BookingTab::Pending,
            Self::InProgress => BookingTab::Current,
            Self::Scheduled => BookingTab::Future,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::UnknownVariant {
                kind: "booking status",
                value: s.to_string(),
            }),
        }
    }
}

/// Grouping used by the bookings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingTab {
    Past,
    Pending,
    Current,
    Future,
}

/// A passenger rating from 1 to 5 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(stars: u8) -> Result<Self, ValidationError> {
        if stars == 0 || stars > 5 {
            return Err(ValidationError::InvalidRating { value: stars });
        }
        Ok(Self(stars))
    }

    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A single ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub service: ServiceLevel,
    pub customer: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub pickup: String,
    pub dropoff: String,
    pub duration_minutes: u32,
    /// Actual earnings once completed, the estimate before.
    pub earnings: Cents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    pub status: BookingStatus,
}

impl Booking {
    pub const fn tab(&self) -> BookingTab {
        self.status.tab()
    }
}

/// Bookings partitioned by tab, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingTabs<'a> {
    pub past: Vec<&'a Booking>,
    pub pending: Vec<&'a Booking>,
    pub current: Vec<&'a Booking>,
    pub future: Vec<&'a Booking>,
}

pub fn group_by_tab(bookings: &[Booking]) -> BookingTabs<'_> {
    let mut tabs = BookingTabs::default();
    for booking in bookings {
        let bucket = match booking.tab() {
            BookingTab::Past => &mut tabs.past,
            BookingTab::Pending => &mut tabs.pending,
            BookingTab::Current => &mut tabs.current,
            BookingTab::Future => &mut tabs.future,
        };
        bucket.push(booking);
    }
    tabs
}

/// Sum of earnings across completed rides.
pub fn completed_earnings(bookings: &[Booking]) -> Cents {
    Cents(
        bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.earnings.0)
            .sum(),
    )
}
