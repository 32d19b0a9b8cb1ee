//! Recurrence rules for tasks.
//!
//! This module defines when a task occurs: a single date, every day, the
//! working week, weekends, or an explicit weekday set.

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// When a task occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Schedule {
    /// A single occurrence on one date.
    Once { date: NaiveDate },
    /// Every day.
    Daily,
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    /// An explicit weekday set.
    Custom { days: Vec<Weekday> },
}

impl Schedule {
    /// Whether the rule includes `day`.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match self {
            Schedule::Once { date } => *date == day,
            Schedule::Daily => true,
            Schedule::Weekdays => !matches!(day.weekday(), Weekday::Sat | Weekday::Sun),
            Schedule::Weekends => matches!(day.weekday(), Weekday::Sat | Weekday::Sun),
            Schedule::Custom { days } => days.contains(&day.weekday()),
        }
    }

    /// Whether the rule can still produce an occurrence on or after `today`.
    /// Recurring rules always can; a one-time date cannot once it has
    /// passed.
    pub fn relevant_from(&self, today: NaiveDate) -> bool {
        match self {
            Schedule::Once { date } => *date >= today,
            _ => true,
        }
    }
}

/// Repeat pattern selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RepeatKind {
    Once,
    Daily,
    Weekdays,
    Weekends,
    Custom,
}

/// Split comma-separated weekday names ("mon,wed,fri") and parse each one,
/// dropping duplicates while keeping first-seen order.
pub fn parse_weekdays(inputs: &[String]) -> Result<Vec<Weekday>, String> {
    let mut days: Vec<Weekday> = Vec::new();
    for raw in inputs {
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let day: Weekday = part
                .parse()
                .map_err(|_| format!("Unrecognised weekday: {part}"))?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
    }
    Ok(days)
}
