//! Focus-session history and notification preferences.
//!
//! One `ProgressStore` per namespace, persisted as its own JSON blob next
//! to the task blob. Remote sessions merge in by id, insert-only.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed focus session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: Uuid,
    #[serde(default)]
    pub task_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub minutes: u32,
}

/// Reminder-related preferences for one namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    pub reminders_enabled: bool,
    #[serde(default)]
    pub default_reminder: Option<NaiveTime>,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        NotificationPrefs {
            reminders_enabled: true,
            default_reminder: None,
        }
    }
}

/// Per-namespace progress state: session history, preferences, and the
/// daily focus goal.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStore {
    pub sessions: Vec<FocusSession>,
    #[serde(default)]
    pub prefs: NotificationPrefs,
    #[serde(default)]
    pub daily_goal_minutes: Option<u32>,
}

impl ProgressStore {
    /// Load the blob at `path`, starting fresh when missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return ProgressStore::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(store) => store,
                Err(e) => {
                    eprintln!("Error parsing progress state, starting fresh: {e}");
                    ProgressStore::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading progress state, starting fresh: {e}");
                ProgressStore::default()
            }
        }
    }

    /// Write the blob using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Record a locally finished session.
    pub fn record_session(&mut self, session: FocusSession) {
        self.sessions.push(session);
    }

    /// Insert-only merge from the sync layer; known ids are left untouched.
    /// Returns how many sessions were added.
    pub fn merge_remote_sessions(&mut self, remote: Vec<FocusSession>) -> usize {
        let mut added = 0;
        for session in remote {
            if !self.sessions.iter().any(|s| s.id == session.id) {
                self.sessions.push(session);
                added += 1;
            }
        }
        if added > 0 {
            self.sessions.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        }
        added
    }

    /// Total focused minutes for sessions started on `day` (UTC).
    pub fn minutes_on(&self, day: NaiveDate) -> u32 {
        self.sessions
            .iter()
            .filter(|s| s.started_at.date_naive() == day)
            .map(|s| s.minutes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_at(secs: i64, minutes: u32) -> FocusSession {
        FocusSession {
            id: Uuid::new_v4(),
            task_id: None,
            started_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            minutes,
        }
    }

    #[test]
    fn test_merge_remote_sessions_inserts_only_unknown() {
        let mut store = ProgressStore::default();
        let local = session_at(0, 25);
        let local_id = local.id;
        store.record_session(local);

        let mut remote_copy = session_at(10, 50);
        remote_copy.id = local_id;
        let fresh = session_at(5, 15);

        assert_eq!(store.merge_remote_sessions(vec![remote_copy, fresh]), 1);
        assert_eq!(store.sessions.len(), 2);
        let kept = store.sessions.iter().find(|s| s.id == local_id).unwrap();
        assert_eq!(kept.minutes, 25);
        // Sorted by start time after a merge.
        assert!(store.sessions[0].started_at <= store.sessions[1].started_at);
    }

    #[test]
    fn test_minutes_on_sums_one_day() {
        let mut store = ProgressStore::default();
        store.record_session(session_at(0, 25));
        store.record_session(session_at(60, 10));
        store.record_session(session_at(86_400 * 2, 40));
        let day = Utc.timestamp_opt(1_700_000_000, 0).unwrap().date_naive();
        assert_eq!(store.minutes_on(day), 35);
    }

    #[test]
    fn test_progress_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guest_progress.json");

        let mut store = ProgressStore::default();
        store.record_session(session_at(0, 25));
        store.prefs.reminders_enabled = false;
        store.prefs.default_reminder = NaiveTime::from_hms_opt(9, 0, 0);
        store.daily_goal_minutes = Some(120);
        store.save(&path).unwrap();

        let loaded = ProgressStore::load(&path);
        assert_eq!(loaded.sessions, store.sessions);
        assert_eq!(loaded.prefs, store.prefs);
        assert_eq!(loaded.daily_goal_minutes, Some(120));
    }

    #[test]
    fn test_load_missing_defaults_prefs_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::load(&dir.path().join("nope.json"));
        assert!(store.prefs.reminders_enabled);
        assert!(store.sessions.is_empty());
    }
}
