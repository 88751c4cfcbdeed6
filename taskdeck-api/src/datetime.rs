//! Timestamp parsing and display helpers.
//!
//! Wire timestamps are `YYYY-MM-DDTHH:MM:SS` strings (optionally with
//! fractional seconds); date-only strings parse as midnight. Everything
//! that depends on the current moment takes `now` explicitly.

use chrono::{NaiveDate, NaiveDateTime};

use crate::task::TaskStatus;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parses a wire timestamp. Accepts full timestamps with or without
/// fractional seconds, and bare dates (midnight).
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Formats a wire timestamp as a readable date (e.g. `May 1, 2024`).
/// Unparseable input yields `N/A`.
#[must_use]
pub fn format_date(value: &str) -> String {
    parse_timestamp(value).map_or_else(|| "N/A".to_string(), |dt| dt.format("%b %-d, %Y").to_string())
}

/// Formats a wire timestamp as a readable date with time
/// (e.g. `May 1, 2024, 14:30`). Unparseable input yields `N/A`.
#[must_use]
pub fn format_date_time(value: &str) -> String {
    parse_timestamp(value).map_or_else(
        || "N/A".to_string(),
        |dt| dt.format("%b %-d, %Y, %H:%M").to_string(),
    )
}

/// Whether a task is overdue: its due date lies in the past and the task
/// is not in a terminal status. Tasks without a due date are never
/// overdue.
#[must_use]
pub fn is_overdue(due_date: Option<&str>, status: TaskStatus, now: NaiveDateTime) -> bool {
    if status.is_terminal() {
        return false;
    }
    due_date
        .and_then(parse_timestamp)
        .is_some_and(|due| due < now)
}

/// Number of days until the due date, rounded up; negative when past due.
/// Returns `None` for unparseable input.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn days_until_due(due_date: &str, now: NaiveDateTime) -> Option<i64> {
    let due = parse_timestamp(due_date)?;
    let seconds = (due - now).num_seconds();
    Some((seconds as f64 / SECONDS_PER_DAY).ceil() as i64)
}

/// Relative description of a past timestamp: `just now`, `N minutes ago`,
/// `N hours ago`, `N days ago`, falling back to the formatted date once
/// more than a week has passed.
#[must_use]
pub fn relative_time(value: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_timestamp(value) else {
        return "N/A".to_string();
    };
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{} hours ago", seconds / 3_600)
    } else if seconds < 604_800 {
        format!("{} days ago", seconds / 86_400)
    } else {
        format_date(value)
    }
}
