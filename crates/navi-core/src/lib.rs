//! Core domain logic for Navi drivers.
//!
//! This crate contains:
//! - Availability: per-date working windows and the lock/horizon rules
//!   that decide which dates a driver may still change
//! - Typed records for bookings, notifications and verification documents

pub mod availability;
pub mod booking;
pub mod document;
pub mod notification;
pub mod policy;
pub mod types;
pub mod window;

pub use availability::{AvailabilityStore, EditError, LockState};
pub use policy::{AvailabilityPolicy, Flow, days_between};
pub use types::ValidationError;
pub use window::{AvailabilityWindow, ShiftPreset, TimeOfDay};
