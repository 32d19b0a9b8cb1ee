//! Account-scoped task state and its persisted blob.
//!
//! `TaskStore` holds the in-memory task list and completion-marker set for
//! one namespace and reads/writes them as a single JSON object. Memory is
//! the source of truth: a failed write risks losing the latest change on
//! restart, nothing more.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order;
use crate::task::{completion_key, day_key, split_completion_key, TaskItem};

/// In-memory task state for one namespace.
#[derive(Debug, Default)]
pub struct TaskStore {
    pub tasks: Vec<TaskItem>,
    pub completed_keys: BTreeSet<String>,
}

/// On-disk layout: one JSON object per namespace.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    tasks: Vec<TaskItem>,
    completed_keys: Vec<String>,
}

impl TaskStore {
    /// Load the blob at `path`, starting fresh when the file is missing or
    /// unreadable. Colliding sort indices are repaired before use.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return TaskStore::default();
        }
        let mut buf = String::new();
        let state: PersistedState =
            match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
                Ok(_) => match serde_json::from_str(&buf) {
                    Ok(state) => state,
                    Err(e) => {
                        eprintln!("Error parsing task state, starting fresh: {e}");
                        PersistedState::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading task state, starting fresh: {e}");
                    PersistedState::default()
                }
            };
        let mut store = TaskStore {
            tasks: state.tasks,
            completed_keys: state.completed_keys.into_iter().collect(),
        };
        order::repair_loaded(&mut store.tasks);
        store
    }

    /// Write the blob using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let state = PersistedState {
            tasks: self.tasks.clone(),
            completed_keys: self.completed_keys.iter().cloned().collect(),
        };
        let data = serde_json::to_string_pretty(&state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Get a task by id.
    pub fn get(&self, id: Uuid) -> Option<&TaskItem> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Insert or replace by id. An incoming `sort_index` of 0 is the unset
    /// sentinel: replacements keep their stored index, new tasks land ahead
    /// of the current minimum. Indices are renormalised afterwards.
    pub fn upsert(&mut self, mut task: TaskItem) {
        match self.tasks.iter().position(|t| t.id == task.id) {
            Some(i) => {
                if task.sort_index == 0 {
                    task.sort_index = self.tasks[i].sort_index;
                }
                self.tasks[i] = task;
            }
            None => {
                if task.sort_index == 0 {
                    let min = self.tasks.iter().map(|t| t.sort_index).min().unwrap_or(0);
                    task.sort_index = min - 1;
                }
                self.tasks.push(task);
            }
        }
        order::renormalize(&mut self.tasks);
    }

    /// Remove a task and every completion marker that belongs to it.
    pub fn delete(&mut self, id: Uuid) -> Option<TaskItem> {
        let i = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(i);
        let id_text = id.to_string();
        self.completed_keys
            .retain(|k| split_completion_key(k).map(|(t, _)| t) != Some(id_text.as_str()));
        order::renormalize(&mut self.tasks);
        Some(removed)
    }

    /// Suppress one day's occurrence of a task and drop any completion
    /// marker for that exact day. The task itself stays.
    pub fn delete_occurrence(&mut self, id: Uuid, day: NaiveDate) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.excluded_day_keys.insert(day_key(day));
        self.completed_keys.remove(&completion_key(id, day));
        true
    }

    /// Flip the completion marker for `(id, day)`. Returns the new
    /// completed state, or `None` for an unknown task id.
    pub fn toggle_completion(&mut self, id: Uuid, day: NaiveDate) -> Option<bool> {
        self.get(id)?;
        let key = completion_key(id, day);
        if self.completed_keys.remove(&key) {
            Some(false)
        } else {
            self.completed_keys.insert(key);
            Some(true)
        }
    }

    /// Whether `(id, day)` is currently marked complete.
    pub fn is_completed(&self, id: Uuid, day: NaiveDate) -> bool {
        self.completed_keys.contains(&completion_key(id, day))
    }

    /// Remove every marker for `day` across all tasks. Returns the ids of
    /// the tasks whose markers were removed.
    pub fn reset_completions(&mut self, day: NaiveDate) -> Vec<Uuid> {
        let target = day_key(day);
        let mut cleared = Vec::new();
        self.completed_keys.retain(|k| {
            let Some((task_part, day_part)) = split_completion_key(k) else {
                return true;
            };
            if day_part != target {
                return true;
            }
            if let Ok(id) = task_part.parse::<Uuid>() {
                cleared.push(id);
            }
            false
        });
        cleared
    }

    /// Record that a preset was produced from the task. Already-recorded
    /// tasks are left untouched, so a second call changes nothing.
    pub fn mark_preset_created(&mut self, id: Uuid) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.preset_created && !task.convert_to_preset {
            return false;
        }
        task.preset_created = true;
        task.convert_to_preset = false;
        true
    }

    /// Tasks occurring on `day`, in canonical order, minus per-day
    /// exclusions.
    pub fn visible_tasks(&self, day: NaiveDate) -> Vec<&TaskItem> {
        self.tasks.iter().filter(|t| t.visible_on(day)).collect()
    }

    /// Reorder the visible subset identified by `visible_ids`; hidden tasks
    /// keep their slots. Returns the ids that moved (empty for a no-op).
    pub fn move_tasks(
        &mut self,
        visible_ids: &[Uuid],
        from: &BTreeSet<usize>,
        to: usize,
    ) -> Vec<Uuid> {
        order::move_visible(&mut self.tasks, visible_ids, from, to)
    }

    /// Authoritative replacement from the sync layer. The incoming order is
    /// repaired the same way a load is.
    pub fn apply_remote_state(&mut self, tasks: Vec<TaskItem>, completion_keys: Vec<String>) {
        self.tasks = tasks;
        self.completed_keys = completion_keys.into_iter().collect();
        order::repair_loaded(&mut self.tasks);
    }

    /// Passive merge: unknown remote tasks are appended, completion keys
    /// union in. Local entries are never overwritten. Returns whether
    /// anything changed.
    pub fn merge_remote(&mut self, tasks: Vec<TaskItem>, completion_keys: Vec<String>) -> bool {
        let mut changed = order::merge_missing(&mut self.tasks, tasks);
        for key in completion_keys {
            changed |= self.completed_keys.insert(key);
        }
        changed
    }

    /// Number of consecutive days ending at `day` with at least one
    /// completion marker.
    pub fn streak_through(&self, day: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut cursor = day;
        loop {
            let key = day_key(cursor);
            let any = self
                .completed_keys
                .iter()
                .any(|k| split_completion_key(k).map(|(_, d)| d) == Some(key.as_str()));
            if !any {
                break;
            }
            streak += 1;
            cursor = cursor - Duration::days(1);
        }
        streak
    }
}
