//! Session command: drive one in-memory availability store from a script.
//!
//! Each input line is one command:
//!
//! ```text
//! commit <DATE> <START> <END>    save hours, e.g. `commit 2024-01-20 09:00 17:00`
//! preset <DATE> <SLOT>           save a sign-up slot: morning|afternoon|evening|night
//! query <DATE>                   show the saved hours for a date
//! check <DATE>                   show whether a date can be edited
//! upcoming [LIMIT]               list saved hours from today on
//! today <DATE>                   move the session's "today"
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Rejected edits and
//! malformed lines are reported and the session carries on.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use navi_core::{AvailabilityStore, AvailabilityWindow, EditError, LockState, ShiftPreset};
use serde::Serialize;

use crate::commands::util::parse_date;

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Commit {
        date: NaiveDate,
        window: AvailabilityWindow,
    },
    Query {
        date: NaiveDate,
    },
    Check {
        date: NaiveDate,
    },
    Upcoming {
        limit: Option<usize>,
    },
    Today {
        date: NaiveDate,
    },
}

/// Parses one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str, today: NaiveDate) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    // Dates may span several tokens ("in 5 days"), so arguments are taken
    // from the end of the line.
    let tokens: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "commit" => {
            let (date, start, end) = match tokens.as_slice() {
                [date @ .., start, end] if !date.is_empty() => (date.join(" "), *start, *end),
                _ => anyhow::bail!("usage: commit <DATE> <START> <END>"),
            };
            SessionCommand::Commit {
                date: parse_date(&date, today)?,
                window: AvailabilityWindow::parse(start, end)?,
            }
        }
        "preset" => {
            let (date, slot) = match tokens.as_slice() {
                [date @ .., slot] if !date.is_empty() => (date.join(" "), *slot),
                _ => anyhow::bail!("usage: preset <DATE> <morning|afternoon|evening|night>"),
            };
            let preset: ShiftPreset = slot.parse()?;
            SessionCommand::Commit {
                date: parse_date(&date, today)?,
                window: preset.window(),
            }
        }
        "query" => SessionCommand::Query {
            date: parse_date(required(rest, "query <DATE>")?, today)?,
        },
        "check" => SessionCommand::Check {
            date: parse_date(required(rest, "check <DATE>")?, today)?,
        },
        "today" => SessionCommand::Today {
            date: parse_date(required(rest, "today <DATE>")?, today)?,
        },
        "upcoming" => SessionCommand::Upcoming {
            limit: if rest.is_empty() {
                None
            } else {
                Some(rest.parse().context("upcoming limit must be a number")?)
            },
        },
        other => anyhow::bail!("unknown command: {other}"),
    };

    Ok(Some(command))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        anyhow::bail!("usage: {usage}");
    }
    Ok(rest)
}

/// A saved window as shown to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub window: AvailabilityWindow,
    pub hours: u8,
}

impl ScheduleEntry {
    fn new(date: NaiveDate, window: AvailabilityWindow) -> Self {
        Self {
            date,
            window,
            hours: window.hours(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    LockedWindow,
    OutOfRange,
}

/// What happened in response to one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    Saved {
        #[serde(flatten)]
        entry: ScheduleEntry,
    },
    Rejected {
        date: NaiveDate,
        kind: RejectionKind,
        message: String,
    },
    Schedule {
        date: NaiveDate,
        window: Option<AvailabilityWindow>,
    },
    Status {
        date: NaiveDate,
        state: LockState,
        editable: bool,
    },
    Upcoming {
        entries: Vec<ScheduleEntry>,
    },
    Today {
        date: NaiveDate,
    },
    Invalid {
        line: usize,
        message: String,
    },
    Summary {
        saved: usize,
        rejected: usize,
        invalid: usize,
    },
}

/// One driver's scheduling session.
#[derive(Debug)]
pub struct Session {
    store: AvailabilityStore,
    today: NaiveDate,
    upcoming_limit: usize,
    saved: usize,
    rejected: usize,
    invalid: usize,
}

impl Session {
    pub const fn new(store: AvailabilityStore, today: NaiveDate, upcoming_limit: usize) -> Self {
        Self {
            store,
            today,
            upcoming_limit,
            saved: 0,
            rejected: 0,
            invalid: 0,
        }
    }

    pub const fn store(&self) -> &AvailabilityStore {
        &self.store
    }

    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    fn upcoming(&self, limit: usize) -> Outcome {
        Outcome::Upcoming {
            entries: self
                .store
                .upcoming(self.today, limit)
                .into_iter()
                .map(|(date, window)| ScheduleEntry::new(date, window))
                .collect(),
        }
    }

    /// Applies a command. A successful commit also refreshes the upcoming list.
    pub fn execute(&mut self, command: SessionCommand) -> Vec<Outcome> {
        match command {
            SessionCommand::Commit { date, window } => {
                match self.store.commit(date, window, self.today) {
                    Ok(()) => {
                        self.saved += 1;
                        vec![
                            Outcome::Saved {
                                entry: ScheduleEntry::new(date, window),
                            },
                            self.upcoming(self.upcoming_limit),
                        ]
                    }
                    Err(err) => {
                        self.rejected += 1;
                        let kind = match err {
                            EditError::LockedWindow { .. } => RejectionKind::LockedWindow,
                            EditError::OutOfRange { .. } => RejectionKind::OutOfRange,
                        };
                        vec![Outcome::Rejected {
                            date,
                            kind,
                            message: err.to_string(),
                        }]
                    }
                }
            }
            SessionCommand::Query { date } => vec![Outcome::Schedule {
                date,
                window: self.store.query(date),
            }],
            SessionCommand::Check { date } => vec![Outcome::Status {
                date,
                state: self.store.lock_state(date, self.today),
                editable: self.store.is_editable(date, self.today),
            }],
            SessionCommand::Upcoming { limit } => {
                vec![self.upcoming(limit.unwrap_or(self.upcoming_limit))]
            }
            SessionCommand::Today { date } => {
                tracing::debug!(from = %self.today, to = %date, "session date moved");
                self.today = date;
                vec![Outcome::Today { date }]
            }
        }
    }

    /// Records a line that could not be parsed.
    pub fn invalid(&mut self, line: usize, err: &anyhow::Error) -> Outcome {
        self.invalid += 1;
        Outcome::Invalid {
            line,
            message: format!("{err:#}"),
        }
    }

    pub const fn summary(&self) -> Outcome {
        Outcome::Summary {
            saved: self.saved,
            rejected: self.rejected,
            invalid: self.invalid,
        }
    }
}

/// Renders an outcome for a terminal.
pub fn write_outcome<W: Write>(writer: &mut W, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Saved { entry } => {
            writeln!(
                writer,
                "Saved {}: {} ({} hours)",
                entry.date, entry.window, entry.hours
            )?;
        }
        Outcome::Rejected { message, .. } => {
            writeln!(writer, "Cannot save: {message}")?;
        }
        Outcome::Schedule { date, window } => match window {
            Some(window) => writeln!(writer, "{date}: {window}")?,
            None => writeln!(writer, "{date}: no hours scheduled")?,
        },
        Outcome::Status { date, state, .. } => {
            writeln!(writer, "{date}: {}", state.as_str())?;
        }
        Outcome::Upcoming { entries } => {
            writeln!(writer, "Upcoming schedule:")?;
            if entries.is_empty() {
                writeln!(writer, "  No scheduled hours yet")?;
            }
            for entry in entries {
                writeln!(
                    writer,
                    "  {:<20}  {}  {} hours",
                    entry.date.format("%A, %B %d").to_string(),
                    entry.window,
                    entry.hours
                )?;
            }
        }
        Outcome::Today { date } => {
            writeln!(writer, "Today is now {date}")?;
        }
        Outcome::Invalid { line, message } => {
            writeln!(writer, "line {line}: {message}")?;
        }
        Outcome::Summary {
            saved,
            rejected,
            invalid,
        } => {
            writeln!(
                writer,
                "Session complete: {saved} saved, {rejected} rejected, {invalid} invalid"
            )?;
        }
    }
    Ok(())
}

fn emit<W: Write>(writer: &mut W, outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string(outcome)?)?;
    } else {
        write_outcome(writer, outcome)?;
    }
    Ok(())
}

/// Runs a session over every line of `reader`, finishing with a summary.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    session: &mut Session,
    json: bool,
) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read session input")?;
        let line_no = index + 1;

        let outcomes = match parse_line(&line, session.today()) {
            Ok(Some(command)) => {
                tracing::trace!(line = line_no, ?command, "executing");
                session.execute(command)
            }
            Ok(None) => continue,
            Err(err) => {
                tracing::debug!(line = line_no, error = %err, "invalid session line");
                vec![session.invalid(line_no, &err)]
            }
        };

        for outcome in &outcomes {
            emit(writer, outcome, json)?;
        }
    }

    emit(writer, &session.summary(), json)
}
