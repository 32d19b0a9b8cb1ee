//! Session coordination for one running app instance.
//!
//! `Session` is the explicitly constructed state holder that owns the
//! per-account stores, the change log, and the collaborator handles, and
//! runs the namespace lifecycle. Callers build one with a data directory
//! and pass it wherever state access is needed; there are no globals.
//!
//! All mutation happens on the caller's single thread. Side effects
//! (reminder scheduling, sync notifications) are queued during a mutation
//! and dispatched after commit, never awaited; delivery is best effort.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::changes::{ChangeLog, EntityKind};
use crate::namespace::{AuthState, Namespace};
use crate::progress::{FocusSession, NotificationPrefs, ProgressStore};
use crate::schedule::Schedule;
use crate::store::TaskStore;
use crate::task::TaskItem;

/// Reminder collaborator. Cancel-then-schedule is the only cancellation
/// primitive.
pub trait ReminderScheduler {
    fn schedule_reminder(
        &mut self,
        task_id: Uuid,
        title: &str,
        time: NaiveTime,
        schedule: &Schedule,
    );
    fn cancel_reminder(&mut self, task_id: Uuid);
}

/// Outbound sync collaborator. Calls are one-way notifications; nothing
/// comes back into this core synchronously.
pub trait SyncEngine {
    fn notify_task_completed(&mut self, task_id: Uuid, title: &str, day: NaiveDate);
    fn notify_session_completed(&mut self, session: &FocusSession);
    fn notify_goal_updated(&mut self, daily_minutes_goal: u32);
}

/// Lifecycle phase, checked at the top of every public mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ApplyingNamespace,
    Mutating,
}

/// Snapshot handed to observers after each committed mutation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tasks: Vec<TaskItem>,
    pub completed_keys: BTreeSet<String>,
}

/// Cancellation handle returned by `Session::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

enum Effect {
    ScheduleReminder {
        task_id: Uuid,
        title: String,
        time: NaiveTime,
        schedule: Schedule,
    },
    CancelReminder {
        task_id: Uuid,
    },
    TaskCompleted {
        task_id: Uuid,
        title: String,
        day: NaiveDate,
    },
    SessionCompleted {
        session: FocusSession,
    },
    GoalUpdated {
        minutes: u32,
    },
}

/// One running app instance's state holder.
pub struct Session {
    dir: PathBuf,
    namespace: Namespace,
    store: TaskStore,
    progress: ProgressStore,
    changes: ChangeLog,
    scheduler: Box<dyn ReminderScheduler>,
    sync: Box<dyn SyncEngine>,
    phase: Phase,
    effects: Vec<Effect>,
    observers: Vec<(SubscriptionId, Box<dyn FnMut(&Snapshot)>)>,
    next_subscription: u64,
}

impl Session {
    /// Open a session rooted at `dir` in the guest namespace, loading its
    /// persisted state and scheduling reminders for loaded tasks.
    pub fn open(
        dir: PathBuf,
        scheduler: Box<dyn ReminderScheduler>,
        sync: Box<dyn SyncEngine>,
    ) -> Self {
        let mut session = Session {
            dir,
            namespace: Namespace::Guest,
            store: TaskStore::default(),
            progress: ProgressStore::default(),
            changes: ChangeLog::default(),
            scheduler,
            sync,
            phase: Phase::Idle,
            effects: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        };
        session.load_namespace();
        session
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Tasks in canonical order.
    pub fn tasks(&self) -> &[TaskItem] {
        &self.store.tasks
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    /// Tasks occurring on `day`, minus per-day exclusions.
    pub fn visible_tasks(&self, day: NaiveDate) -> Vec<&TaskItem> {
        self.store.visible_tasks(day)
    }

    /// Whether `(id, day)` is marked complete.
    pub fn completed(&self, id: Uuid, day: NaiveDate) -> bool {
        self.store.is_completed(id, day)
    }

    /// Consecutive-day completion streak ending at `day`.
    pub fn streak_through(&self, day: NaiveDate) -> u32 {
        self.store.streak_through(day)
    }

    /// React to an account change. A state resolving to the current
    /// namespace is a no-op. A real switch cancels the old namespace's
    /// reminders, purges its change markers, loads the new namespace's
    /// state, and reschedules its reminders, with persistence suppressed
    /// throughout.
    pub fn apply_auth_state(&mut self, auth: &AuthState) {
        let next = Namespace::resolve(auth);
        if next == self.namespace {
            return;
        }
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::ApplyingNamespace;
        for task in &self.store.tasks {
            self.scheduler.cancel_reminder(task.id);
        }
        let old = std::mem::replace(&mut self.namespace, next);
        self.changes.purge_namespace(&old);
        self.load_namespace();
        self.phase = Phase::Idle;
    }

    /// Register an observer. It receives a snapshot after every committed
    /// task-state mutation until `unsubscribe` is called with the returned
    /// id.
    pub fn subscribe(&mut self, callback: Box<dyn FnMut(&Snapshot)>) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(sid, _)| *sid != id);
    }

    /// Insert or update a task, then refresh its reminder. The old
    /// reminder is cancelled first so reschedules never accumulate.
    pub fn upsert(&mut self, task: TaskItem) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        self.effects.push(Effect::CancelReminder { task_id: task.id });
        if self.progress.prefs.reminders_enabled {
            if let Some(time) = task.reminder_time {
                if task.schedule.relevant_from(Local::now().date_naive()) {
                    self.effects.push(Effect::ScheduleReminder {
                        task_id: task.id,
                        title: task.title.clone(),
                        time,
                        schedule: task.schedule.clone(),
                    });
                }
            }
        }
        self.changes.record(EntityKind::Task, task.id, &self.namespace);
        self.store.upsert(task);
        self.commit_tasks();
    }

    /// Remove a task, its completion markers, and its pending reminder.
    pub fn delete(&mut self, id: Uuid) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        if self.store.delete(id).is_none() {
            self.phase = Phase::Idle;
            return;
        }
        self.effects.push(Effect::CancelReminder { task_id: id });
        self.changes.record(EntityKind::Task, id, &self.namespace);
        self.commit_tasks();
    }

    /// Suppress one day's occurrence of a recurring task without deleting
    /// the task.
    pub fn delete_occurrence(&mut self, id: Uuid, day: NaiveDate) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        if !self.store.delete_occurrence(id, day) {
            self.phase = Phase::Idle;
            return;
        }
        self.changes.record(EntityKind::Task, id, &self.namespace);
        self.changes.record(EntityKind::Completion, id, &self.namespace);
        self.commit_tasks();
    }

    /// Flip completion for `(id, day)`. A transition to completed notifies
    /// the sync collaborator.
    pub fn toggle_completion(&mut self, id: Uuid, day: NaiveDate) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        match self.store.toggle_completion(id, day) {
            None => {
                self.phase = Phase::Idle;
            }
            Some(completed) => {
                self.changes.record(EntityKind::Completion, id, &self.namespace);
                if completed {
                    if let Some(task) = self.store.get(id) {
                        self.effects.push(Effect::TaskCompleted {
                            task_id: id,
                            title: task.title.clone(),
                            day,
                        });
                    }
                }
                self.commit_tasks();
            }
        }
    }

    /// Clear every completion marker for `day`, across all tasks.
    pub fn reset_completions(&mut self, day: NaiveDate) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        let cleared = self.store.reset_completions(day);
        if cleared.is_empty() {
            self.phase = Phase::Idle;
            return;
        }
        for id in cleared {
            self.changes.record(EntityKind::Completion, id, &self.namespace);
        }
        self.commit_tasks();
    }

    /// Record that a preset was produced from the task. Idempotent.
    pub fn mark_preset_created(&mut self, id: Uuid) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        if !self.store.mark_preset_created(id) {
            self.phase = Phase::Idle;
            return;
        }
        self.changes.record(EntityKind::Task, id, &self.namespace);
        self.commit_tasks();
    }

    /// Reorder the currently visible subset; hidden tasks keep their
    /// slots. No-op with fewer than two visible ids.
    pub fn move_tasks(&mut self, visible_ids: &[Uuid], from: &BTreeSet<usize>, to: usize) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        let moved = self.store.move_tasks(visible_ids, from, to);
        if moved.is_empty() {
            self.phase = Phase::Idle;
            return;
        }
        for id in moved {
            self.changes.record(EntityKind::Task, id, &self.namespace);
        }
        self.commit_tasks();
    }

    /// Authoritative replacement from the sync layer. No reminder or sync
    /// side effects fire and no local change markers are recorded;
    /// rescheduling is the caller's responsibility.
    pub fn apply_remote_task_state(&mut self, tasks: Vec<TaskItem>, completion_keys: Vec<String>) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        self.store.apply_remote_state(tasks, completion_keys);
        self.commit_tasks();
    }

    /// Passive merge from the sync layer: unknown tasks and missing
    /// completion keys are added; local entries are never overwritten.
    pub fn merge_remote_task_state(&mut self, tasks: Vec<TaskItem>, completion_keys: Vec<String>) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        if self.store.merge_remote(tasks, completion_keys) {
            self.commit_tasks();
        } else {
            self.phase = Phase::Idle;
        }
    }

    /// Record a finished focus session and notify the sync collaborator.
    pub fn record_focus_session(&mut self, session: FocusSession) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        self.changes.record(EntityKind::Session, session.id, &self.namespace);
        self.effects.push(Effect::SessionCompleted {
            session: session.clone(),
        });
        self.progress.record_session(session);
        self.commit_progress();
    }

    /// Insert-only merge of remote sessions; known ids stay untouched.
    pub fn merge_remote_sessions(&mut self, remote: Vec<FocusSession>) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        if self.progress.merge_remote_sessions(remote) > 0 {
            self.persist_progress();
        }
        self.phase = Phase::Idle;
    }

    /// Update the daily focus goal and notify the sync collaborator.
    pub fn set_daily_goal(&mut self, minutes: u32) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Mutating;
        self.progress.daily_goal_minutes = Some(minutes);
        self.changes.record(EntityKind::Prefs, Uuid::nil(), &self.namespace);
        self.effects.push(Effect::GoalUpdated { minutes });
        self.commit_progress();
    }

    /// Replace notification preferences. Disabling reminders cancels every
    /// scheduled one; enabling reschedules from current state.
    pub fn set_prefs(&mut self, prefs: NotificationPrefs) {
        if self.phase != Phase::Idle || prefs == self.progress.prefs {
            return;
        }
        self.phase = Phase::Mutating;
        let was_enabled = self.progress.prefs.reminders_enabled;
        self.progress.prefs = prefs;
        let now_enabled = self.progress.prefs.reminders_enabled;
        if was_enabled && !now_enabled {
            for task in &self.store.tasks {
                self.effects.push(Effect::CancelReminder { task_id: task.id });
            }
        }
        if !was_enabled && now_enabled {
            let today = Local::now().date_naive();
            for task in &self.store.tasks {
                if let Some(time) = task.reminder_time {
                    if task.schedule.relevant_from(today) {
                        self.effects.push(Effect::ScheduleReminder {
                            task_id: task.id,
                            title: task.title.clone(),
                            time,
                            schedule: task.schedule.clone(),
                        });
                    }
                }
            }
        }
        self.changes.record(EntityKind::Prefs, Uuid::nil(), &self.namespace);
        self.commit_progress();
    }

    fn load_namespace(&mut self) {
        self.store = TaskStore::load(&self.namespace.tasks_path(&self.dir));
        self.progress = ProgressStore::load(&self.namespace.progress_path(&self.dir));
        let today = Local::now().date_naive();
        if self.progress.prefs.reminders_enabled {
            for task in &self.store.tasks {
                if let Some(time) = task.reminder_time {
                    if task.schedule.relevant_from(today) {
                        self.scheduler
                            .schedule_reminder(task.id, &task.title, time, &task.schedule);
                    }
                }
            }
        }
        self.emit_snapshot();
    }

    fn commit_tasks(&mut self) {
        if self.phase != Phase::ApplyingNamespace {
            self.persist_tasks();
        }
        self.dispatch_effects();
        self.emit_snapshot();
        self.phase = Phase::Idle;
    }

    fn commit_progress(&mut self) {
        if self.phase != Phase::ApplyingNamespace {
            self.persist_progress();
        }
        self.dispatch_effects();
        self.phase = Phase::Idle;
    }

    fn persist_tasks(&mut self) {
        let path = self.namespace.tasks_path(&self.dir);
        if let Err(e) = self.store.save(&path) {
            eprintln!("Error saving task state for {}: {e}", self.namespace.key());
        }
    }

    fn persist_progress(&mut self) {
        let path = self.namespace.progress_path(&self.dir);
        if let Err(e) = self.progress.save(&path) {
            eprintln!(
                "Error saving progress state for {}: {e}",
                self.namespace.key()
            );
        }
    }

    fn dispatch_effects(&mut self) {
        for effect in std::mem::take(&mut self.effects) {
            match effect {
                Effect::ScheduleReminder {
                    task_id,
                    title,
                    time,
                    schedule,
                } => self
                    .scheduler
                    .schedule_reminder(task_id, &title, time, &schedule),
                Effect::CancelReminder { task_id } => self.scheduler.cancel_reminder(task_id),
                Effect::TaskCompleted {
                    task_id,
                    title,
                    day,
                } => self.sync.notify_task_completed(task_id, &title, day),
                Effect::SessionCompleted { session } => {
                    self.sync.notify_session_completed(&session)
                }
                Effect::GoalUpdated { minutes } => self.sync.notify_goal_updated(minutes),
            }
        }
    }

    fn emit_snapshot(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = Snapshot {
            tasks: self.store.tasks.clone(),
            completed_keys: self.store.completed_keys.clone(),
        };
        for (_, callback) in self.observers.iter_mut() {
            callback(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::NaiveDate;

    #[derive(Default)]
    struct RecordingScheduler {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ReminderScheduler for RecordingScheduler {
        fn schedule_reminder(&mut self, task_id: Uuid, _: &str, _: NaiveTime, _: &Schedule) {
            self.log.borrow_mut().push(format!("schedule:{task_id}"));
        }

        fn cancel_reminder(&mut self, task_id: Uuid) {
            self.log.borrow_mut().push(format!("cancel:{task_id}"));
        }
    }

    #[derive(Default)]
    struct RecordingSync {
        completed: Rc<RefCell<Vec<(Uuid, String)>>>,
    }

    impl SyncEngine for RecordingSync {
        fn notify_task_completed(&mut self, task_id: Uuid, title: &str, _: NaiveDate) {
            self.completed.borrow_mut().push((task_id, title.into()));
        }

        fn notify_session_completed(&mut self, _: &FocusSession) {}

        fn notify_goal_updated(&mut self, _: u32) {}
    }

    type SchedulerLog = Rc<RefCell<Vec<String>>>;
    type CompletedLog = Rc<RefCell<Vec<(Uuid, String)>>>;

    fn open_session(dir: &std::path::Path) -> (Session, SchedulerLog, CompletedLog) {
        let scheduler_log: SchedulerLog = Rc::default();
        let completed: CompletedLog = Rc::default();
        let session = Session::open(
            dir.to_path_buf(),
            Box::new(RecordingScheduler {
                log: scheduler_log.clone(),
            }),
            Box::new(RecordingSync {
                completed: completed.clone(),
            }),
        );
        (session, scheduler_log, completed)
    }

    fn reminder_task(title: &str) -> TaskItem {
        let mut task = TaskItem::new(title, Schedule::Daily);
        task.reminder_time = NaiveTime::from_hms_opt(8, 0, 0);
        task
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upsert_cancels_then_schedules() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, log, _) = open_session(dir.path());
        let task = reminder_task("walk");
        let id = task.id;
        session.upsert(task);
        assert_eq!(
            log.borrow().as_slice(),
            [format!("cancel:{id}"), format!("schedule:{id}")]
        );
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_namespace_switch_cancels_loads_and_purges() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, log, _) = open_session(dir.path());
        let a = reminder_task("a");
        let b = reminder_task("b");
        let (a_id, b_id) = (a.id, b.id);
        session.upsert(a);
        session.upsert(b);
        assert_eq!(session.changes().len(), 2);

        log.borrow_mut().clear();
        session.apply_auth_state(&AuthState::SignedIn("alice".into()));

        assert_eq!(session.namespace(), &Namespace::User("alice".into()));
        assert!(session.tasks().is_empty());
        // Old reminders are gone and nothing new was scheduled.
        let calls = log.borrow().clone();
        assert!(calls.contains(&format!("cancel:{a_id}")));
        assert!(calls.contains(&format!("cancel:{b_id}")));
        assert!(!calls.iter().any(|c| c.starts_with("schedule:")));
        // Guest markers were purged, the new namespace starts clean.
        assert!(session.changes().is_empty());
    }

    #[test]
    fn test_namespace_switch_round_trip_reloads_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, log, _) = open_session(dir.path());
        let a = reminder_task("a");
        let a_id = a.id;
        session.upsert(a);

        session.apply_auth_state(&AuthState::SignedIn("alice".into()));
        session.upsert(reminder_task("alice-task"));

        log.borrow_mut().clear();
        session.apply_auth_state(&AuthState::SignedOut);

        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.tasks()[0].id, a_id);
        // The reloaded guest task gets its reminder rescheduled.
        assert!(log.borrow().contains(&format!("schedule:{a_id}")));
    }

    #[test]
    fn test_redundant_auth_state_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, log, _) = open_session(dir.path());
        session.upsert(reminder_task("a"));
        let before = log.borrow().len();
        session.apply_auth_state(&AuthState::SignedOut);
        assert_eq!(log.borrow().len(), before);
        assert_eq!(session.tasks().len(), 1);
    }

    #[test]
    fn test_toggle_notifies_sync_on_completion_only() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _, completed) = open_session(dir.path());
        let task = TaskItem::new("read", Schedule::Daily);
        let id = task.id;
        session.upsert(task);
        let d = day(2024, 6, 1);

        session.toggle_completion(id, d);
        assert_eq!(completed.borrow().len(), 1);
        assert_eq!(completed.borrow()[0], (id, "read".to_string()));

        // Untoggling must not notify again.
        session.toggle_completion(id, d);
        assert_eq!(completed.borrow().len(), 1);
    }

    #[test]
    fn test_subscription_receives_snapshots_until_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _, _) = open_session(dir.path());
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = seen.clone();
        let sub = session.subscribe(Box::new(move |snapshot: &Snapshot| {
            sink.borrow_mut().push(snapshot.tasks.len());
        }));

        session.upsert(TaskItem::new("a", Schedule::Daily));
        session.upsert(TaskItem::new("b", Schedule::Daily));
        assert_eq!(seen.borrow().as_slice(), [1, 2]);

        session.unsubscribe(sub);
        session.upsert(TaskItem::new("c", Schedule::Daily));
        assert_eq!(seen.borrow().as_slice(), [1, 2]);
    }

    #[test]
    fn test_remote_apply_fires_no_effects_or_markers() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, log, _) = open_session(dir.path());
        let remote = reminder_task("remote");
        session.apply_remote_task_state(vec![remote], Vec::new());

        assert_eq!(session.tasks().len(), 1);
        assert!(log.borrow().is_empty());
        assert!(session.changes().is_empty());
        // The replacement still reached disk.
        let reopened = crate::store::TaskStore::load(
            &session.namespace().tasks_path(dir.path()),
        );
        assert_eq!(reopened.tasks.len(), 1);
    }

    #[test]
    fn test_merge_remote_task_state_is_insert_only() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _, _) = open_session(dir.path());
        let local = TaskItem::new("local", Schedule::Daily);
        let local_id = local.id;
        session.upsert(local);

        let mut remote_copy = TaskItem::new("remote-version", Schedule::Daily);
        remote_copy.id = local_id;
        let fresh = TaskItem::new("fresh", Schedule::Daily);
        session.merge_remote_task_state(vec![remote_copy, fresh], vec!["x|2024-6-1".into()]);

        assert_eq!(session.tasks().len(), 2);
        let kept = session.tasks().iter().find(|t| t.id == local_id).unwrap();
        assert_eq!(kept.title, "local");
    }

    #[test]
    fn test_disabling_reminders_cancels_all() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, log, _) = open_session(dir.path());
        let task = reminder_task("walk");
        let id = task.id;
        session.upsert(task);

        log.borrow_mut().clear();
        session.set_prefs(NotificationPrefs {
            reminders_enabled: false,
            default_reminder: None,
        });
        assert_eq!(log.borrow().as_slice(), [format!("cancel:{id}")]);

        // Re-enabling schedules again from current state.
        log.borrow_mut().clear();
        session.set_prefs(NotificationPrefs {
            reminders_enabled: true,
            default_reminder: None,
        });
        assert_eq!(log.borrow().as_slice(), [format!("schedule:{id}")]);
    }

    #[test]
    fn test_focus_session_merge_and_goal() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _, _) = open_session(dir.path());
        let focus = FocusSession {
            id: Uuid::new_v4(),
            task_id: None,
            started_at: chrono::Utc::now(),
            minutes: 25,
        };
        let focus_id = focus.id;
        session.record_focus_session(focus.clone());
        // Remote copy of the same session does not duplicate.
        session.merge_remote_sessions(vec![focus]);
        assert_eq!(session.progress().sessions.len(), 1);
        assert!(session
            .changes()
            .changed_at(EntityKind::Session, focus_id, &Namespace::Guest)
            .is_some());

        session.set_daily_goal(120);
        assert_eq!(session.progress().daily_goal_minutes, Some(120));
    }
}
