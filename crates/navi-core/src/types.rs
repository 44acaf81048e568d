//! Shared type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A time of day was not a whole hour in `HH:00` form.
    #[error("invalid time '{value}': expected a whole hour between 00:00 and 23:00")]
    InvalidTime { value: String },

    /// A window whose start and end are the same hour.
    #[error("availability window {at}-{at} is empty")]
    EmptyWindow { at: String },

    /// The lock threshold lies beyond the selection horizon.
    #[error("lock threshold of {lock_days} days exceeds selection horizon of {horizon_days} days")]
    PolicyRange { lock_days: u32, horizon_days: u32 },

    /// The selection horizon is longer than any schedule can usefully span.
    #[error("selection horizon of {horizon_days} days exceeds the maximum of {max_days} days")]
    HorizonTooLong { horizon_days: u32, max_days: u32 },

    /// A passenger rating outside 1..=5.
    #[error("rating must be between 1 and 5, got {value}")]
    InvalidRating { value: u8 },

    /// A string that names no variant of the given enum.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated booking identifier.
    BookingId, "booking ID"
);

define_string_id!(
    /// A validated notification identifier.
    NotificationId, "notification ID"
);

/// A monetary amount in whole cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}
