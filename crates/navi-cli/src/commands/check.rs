//! Check command for a single date's edit state.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use navi_core::{AvailabilityPolicy, AvailabilityStore, LockState, days_between};

pub fn run<W: Write>(
    writer: &mut W,
    store: &AvailabilityStore,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let state = store.lock_state(date, today);
    let policy = store.policy();

    writeln!(writer, "Date:     {date} ({})", date.format("%A"))?;
    writeln!(writer, "Today:    {today}")?;
    writeln!(writer, "Days out: {}", days_between(today, date))?;
    writeln!(writer, "Status:   {}", state.as_str())?;
    writeln!(writer, "{}", explain(state, policy, today))?;

    Ok(())
}

/// One-line explanation of a lock state, for humans.
pub fn explain(state: LockState, policy: &AvailabilityPolicy, today: NaiveDate) -> String {
    match state {
        LockState::Editable => "Hours for this date can be changed.".to_string(),
        LockState::Past | LockState::Locked => format!(
            "Changes must be made at least {} days in advance; the earliest editable date is {}.",
            policy.lock_days(),
            policy.first_editable(today)
        ),
        LockState::BeyondHorizon => format!(
            "Dates can be scheduled at most {} days ahead, through {}.",
            policy.horizon_days(),
            policy.selectable_range(today).1
        ),
    }
}
