//! Per-date availability commitments and the rules gating their edits.
//!
//! A date's editability is never stored: it is derived from the distance
//! between the date and "today" each time it is asked for, so a date that
//! was editable at the start of a session can lock while the session runs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::policy::{AvailabilityPolicy, days_between};
use crate::window::AvailabilityWindow;

/// Why a commit was refused. The store is unchanged in both cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The date is in the past or inside the lock threshold.
    #[error(
        "availability for {date} is locked: changes must be made at least {lock_days} days in advance"
    )]
    LockedWindow {
        date: NaiveDate,
        days_until: i64,
        lock_days: u32,
    },

    /// The date lies beyond the selection horizon.
    #[error(
        "{date} is outside the schedulable range: dates can be set at most {horizon_days} days ahead"
    )]
    OutOfRange { date: NaiveDate, horizon_days: u32 },
}

/// Derived edit state of a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Before today.
    Past,
    /// Today or within the lock threshold.
    Locked,
    /// Open for edits.
    Editable,
    /// Further ahead than the selection horizon.
    BeyondHorizon,
}

impl LockState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Locked => "locked",
            Self::Editable => "editable",
            Self::BeyondHorizon => "beyond horizon",
        }
    }
}

/// A driver's committed availability for one session.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityStore {
    policy: AvailabilityPolicy,
    entries: BTreeMap<NaiveDate, AvailabilityWindow>,
}

impl AvailabilityStore {
    /// Creates an empty store governed by `policy`.
    pub const fn new(policy: AvailabilityPolicy) -> Self {
        Self {
            policy,
            entries: BTreeMap::new(),
        }
    }

    pub const fn policy(&self) -> &AvailabilityPolicy {
        &self.policy
    }

    /// Whether the availability for `date` may still be changed on `today`.
    pub fn is_editable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.policy.is_editable(date, today)
    }

    /// Classifies `date` relative to `today`.
    pub fn lock_state(&self, date: NaiveDate, today: NaiveDate) -> LockState {
        let days = days_between(today, date);
        if days < 0 {
            LockState::Past
        } else if !self.policy.is_editable(date, today) {
            LockState::Locked
        } else if days > i64::from(self.policy.horizon_days()) {
            LockState::BeyondHorizon
        } else {
            LockState::Editable
        }
    }

    /// Saves `window` for `date`, replacing any earlier window for that date.
    pub fn commit(
        &mut self,
        date: NaiveDate,
        window: AvailabilityWindow,
        today: NaiveDate,
    ) -> Result<(), EditError> {
        let days_until = days_between(today, date);

        if !self.policy.is_editable(date, today) {
            tracing::debug!(%date, %today, days_until, "rejected edit inside lock window");
            return Err(EditError::LockedWindow {
                date,
                days_until,
                lock_days: self.policy.lock_days(),
            });
        }

        if days_until > i64::from(self.policy.horizon_days()) {
            tracing::debug!(%date, %today, days_until, "rejected edit beyond horizon");
            return Err(EditError::OutOfRange {
                date,
                horizon_days: self.policy.horizon_days(),
            });
        }

        let previous = self.entries.insert(date, window);
        tracing::debug!(%date, %window, replaced = previous.is_some(), "committed availability");
        Ok(())
    }

    pub fn query(&self, date: NaiveDate) -> Option<AvailabilityWindow> {
        self.entries.get(&date).copied()
    }

    /// Entries dated `today` or later in date order, at most `limit` of them.
    ///
    /// Older entries stay in the store; they are only left out of the view.
    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<(NaiveDate, AvailabilityWindow)> {
        self.entries
            .range(today..)
            .take(limit)
            .map(|(date, window)| (*date, *window))
            .collect()
    }

    /// All entries, past included, in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, AvailabilityWindow)> + '_ {
        self.entries.iter().map(|(date, window)| (*date, *window))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
