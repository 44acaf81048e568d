//! Calendar command: every selectable date and whether it can be edited.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use navi_core::{AvailabilityStore, LockState};
use serde::Serialize;

/// One row of the calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub state: LockState,
}

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonCalendar {
    pub today: NaiveDate,
    pub lock_days: u32,
    pub horizon_days: u32,
    pub dates: Vec<CalendarDay>,
}

/// Builds the rows for `today ..= today + horizon`.
pub fn calendar_days(store: &AvailabilityStore, today: NaiveDate) -> Vec<CalendarDay> {
    let (first, last) = store.policy().selectable_range(today);
    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| CalendarDay {
            date,
            weekday: date.format("%a").to_string(),
            state: store.lock_state(date, today),
        })
        .collect()
}

pub fn format_calendar<W: Write>(
    writer: &mut W,
    store: &AvailabilityStore,
    today: NaiveDate,
) -> Result<()> {
    let policy = store.policy();
    let days = calendar_days(store, today);

    writeln!(
        writer,
        "Selectable dates {} to {} (edits close {} days ahead)",
        today,
        policy.selectable_range(today).1,
        policy.lock_days()
    )?;
    for day in &days {
        writeln!(writer, "{}  {}  {}", day.date, day.weekday, day.state.as_str())?;
    }

    Ok(())
}

pub fn format_calendar_json(store: &AvailabilityStore, today: NaiveDate) -> Result<String> {
    let policy = store.policy();
    let calendar = JsonCalendar {
        today,
        lock_days: policy.lock_days(),
        horizon_days: policy.horizon_days(),
        dates: calendar_days(store, today),
    };
    Ok(serde_json::to_string_pretty(&calendar)?)
}

/// Runs the calendar command.
pub fn run<W: Write>(
    writer: &mut W,
    store: &AvailabilityStore,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    if json {
        writeln!(writer, "{}", format_calendar_json(store, today)?)?;
    } else {
        format_calendar(writer, store, today)?;
    }
    Ok(())
}
