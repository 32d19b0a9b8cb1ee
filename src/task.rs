//! Task data structure and per-day key formats.
//!
//! This module defines the `TaskItem` record held by the store, plus the
//! canonical day-key and completion-key formats shared by every component
//! that touches per-day state.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::Schedule;

/// A single tracked task with its recurrence and ordering metadata.
///
/// Tasks live in one account partition and are displayed in the order
/// defined by `(sort_index, created_at)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub schedule: Schedule,
    #[serde(default)]
    pub reminder_time: Option<NaiveTime>,
    /// Total-order key. 0 means "unset" on input; the store rewrites every
    /// index to the task's 0-based position after each mutation.
    #[serde(default)]
    pub sort_index: i64,
    pub created_at: DateTime<Utc>,
    /// Day keys on which this task's occurrence is suppressed without
    /// deleting the task.
    #[serde(default)]
    pub excluded_day_keys: BTreeSet<String>,
    #[serde(default)]
    pub preset_created: bool,
    #[serde(default)]
    pub convert_to_preset: bool,
}

impl TaskItem {
    /// Create a task with a fresh id, an unset sort index, and the current
    /// time as its creation stamp.
    pub fn new(title: impl Into<String>, schedule: Schedule) -> Self {
        TaskItem {
            id: Uuid::new_v4(),
            title: title.into(),
            notes: String::new(),
            schedule,
            reminder_time: None,
            sort_index: 0,
            created_at: Utc::now(),
            excluded_day_keys: BTreeSet::new(),
            preset_created: false,
            convert_to_preset: false,
        }
    }

    /// Whether the task occurs on `day` and is not excluded for it.
    pub fn visible_on(&self, day: NaiveDate) -> bool {
        self.schedule.occurs_on(day) && !self.excluded_day_keys.contains(&day_key(day))
    }
}

/// Canonical day key for `day`: `"<year>-<month>-<day>"` without zero
/// padding. All per-day state must derive its key through here.
pub fn day_key(day: NaiveDate) -> String {
    format!("{}-{}-{}", day.year(), day.month(), day.day())
}

/// Completion-marker key for a task on a day: `"<taskId>|<dayKey>"`.
pub fn completion_key(task_id: Uuid, day: NaiveDate) -> String {
    format!("{}|{}", task_id, day_key(day))
}

/// Split a completion key into its task-id and day-key halves.
pub fn split_completion_key(key: &str) -> Option<(&str, &str)> {
    key.split_once('|')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_key_is_unpadded() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(day_key(day), "2024-6-1");
        let day = NaiveDate::from_ymd_opt(2024, 11, 28).unwrap();
        assert_eq!(day_key(day), "2024-11-28");
    }

    #[test]
    fn test_completion_key_splits_back() {
        let id = Uuid::new_v4();
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let key = completion_key(id, day);
        let (task_part, day_part) = split_completion_key(&key).unwrap();
        assert_eq!(task_part, id.to_string());
        assert_eq!(day_part, "2024-6-1");
    }

    #[test]
    fn test_visible_on_respects_exclusions() {
        let mut task = TaskItem::new("stretch", Schedule::Daily);
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(task.visible_on(day));
        task.excluded_day_keys.insert(day_key(day));
        assert!(!task.visible_on(day));
        let next = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert!(task.visible_on(next));
    }
}
