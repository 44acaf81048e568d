//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, Local, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:in\s+(\d+)\s+days?|(\d+)\s+days?\s+ago)$").expect("valid regex")
});

/// Conservative bound for relative offsets (~100 years).
const MAX_RELATIVE_DAYS: u64 = 100 * 366;

/// Parse a date as ISO 8601 or relative to `today`.
///
/// Supports:
/// - ISO 8601: "2024-01-20"
/// - Relative: "today", "tomorrow", "yesterday", "in 3 days", "2 days ago"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let shifted = match s {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => {
            let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
                anyhow::bail!(
                    "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-01-20) or relative (e.g., 'in 3 days')"
                );
            };

            let (digits, ahead) = match (caps.get(1), caps.get(2)) {
                (Some(n), _) => (n.as_str(), true),
                (None, Some(n)) => (n.as_str(), false),
                (None, None) => anyhow::bail!("Invalid date: {s}"),
            };
            let n: u64 = digits
                .parse()
                .context("failed to parse number in relative date")?;
            if n > MAX_RELATIVE_DAYS {
                anyhow::bail!("Relative date offset too large: {n} days");
            }

            if ahead {
                today.checked_add_days(Days::new(n))
            } else {
                today.checked_sub_days(Days::new(n))
            }
        }
    };

    shifted.with_context(|| format!("date out of range: {s}"))
}

/// Resolve the session's "today": an explicit ISO date, or the local date.
pub fn resolve_today(explicit: Option<&str>) -> anyhow::Result<NaiveDate> {
    let local = Local::now().date_naive();
    match explicit {
        Some(s) => parse_date(s, local),
        None => Ok(local),
    }
}
