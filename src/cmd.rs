//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers for the subcommands exposed by
//! the CLI, all thin wrappers over `Session`, plus the account file that
//! remembers who is signed in between runs.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::namespace::AuthState;
use crate::schedule::{parse_weekdays, RepeatKind, Schedule};
use crate::session::{ReminderScheduler, Session, SyncEngine};
use crate::task::{day_key, TaskItem};

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer notes.
        #[arg(long)]
        notes: Option<String>,
        /// Repeat pattern: once | daily | weekdays | weekends | custom.
        #[arg(long, value_enum, default_value_t = RepeatKind::Daily)]
        repeat: RepeatKind,
        /// Date for a one-time task: YYYY-MM-DD, "today", or "tomorrow".
        #[arg(long)]
        date: Option<String>,
        /// Weekdays for a custom repeat. May be repeated and
        /// comma-separated ("mon,wed,fri").
        #[arg(long = "on")]
        on: Vec<String>,
        /// Reminder time of day (HH:MM).
        #[arg(long)]
        remind: Option<String>,
    },

    /// List tasks visible on a day (today by default).
    List {
        /// Day: YYYY-MM-DD, "today", "tomorrow", or "yesterday".
        #[arg(long)]
        day: Option<String>,
        /// Include every task regardless of the day's schedule.
        #[arg(long)]
        all: bool,
    },

    /// Toggle completion for a task on a day.
    Done {
        /// Task id (or unique prefix) or exact title.
        id: String,
        #[arg(long)]
        day: Option<String>,
    },

    /// Skip a single occurrence of a recurring task.
    Skip {
        /// Task id (or unique prefix) or exact title.
        id: String,
        #[arg(long)]
        day: Option<String>,
    },

    /// Move a visible task to a new position in the day's list.
    Move {
        /// Task id (or unique prefix) or exact title.
        id: String,
        /// Target position among the day's visible tasks (0-based).
        to: usize,
        #[arg(long)]
        day: Option<String>,
    },

    /// Delete a task and all of its completion history.
    Rm {
        /// Task id (or unique prefix) or exact title.
        id: String,
    },

    /// Clear every completion for a day.
    Reset {
        #[arg(long)]
        day: Option<String>,
    },

    /// Record that a preset was created from a task.
    Preset {
        /// Task id (or unique prefix) or exact title.
        id: String,
    },

    /// Show the completion streak ending today.
    Streak,

    /// Sign in and switch to that account's data.
    Login {
        /// Account user id.
        user: String,
    },

    /// Sign out and switch back to guest data.
    Logout,

    /// Show the active account partition.
    Whoami,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// The CLI has no OS notification surface; reminder calls are accepted and
/// dropped.
pub struct NoopScheduler;

impl ReminderScheduler for NoopScheduler {
    fn schedule_reminder(&mut self, _: Uuid, _: &str, _: NaiveTime, _: &Schedule) {}

    fn cancel_reminder(&mut self, _: Uuid) {}
}

/// Stand-in sync collaborator; the CLI has nothing to sync against.
pub struct NoopSync;

impl SyncEngine for NoopSync {
    fn notify_task_completed(&mut self, _: Uuid, _: &str, _: NaiveDate) {}

    fn notify_session_completed(&mut self, _: &crate::progress::FocusSession) {}

    fn notify_goal_updated(&mut self, _: u32) {}
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountFile {
    user: Option<String>,
}

/// Read the signed-in account from `account.json`, defaulting to guest.
pub fn load_auth_state(dir: &Path) -> AuthState {
    let path = dir.join("account.json");
    if !path.exists() {
        return AuthState::SignedOut;
    }
    match fs::read_to_string(&path) {
        Ok(buf) => match serde_json::from_str::<AccountFile>(&buf) {
            Ok(account) => match account.user {
                Some(user) if !user.is_empty() => AuthState::SignedIn(user),
                _ => AuthState::SignedOut,
            },
            Err(e) => {
                eprintln!("Error parsing account file, using guest: {e}");
                AuthState::SignedOut
            }
        },
        Err(e) => {
            eprintln!("Error reading account file, using guest: {e}");
            AuthState::SignedOut
        }
    }
}

fn save_auth_state(dir: &Path, auth: &AuthState) {
    let account = AccountFile {
        user: match auth {
            AuthState::SignedOut => None,
            AuthState::SignedIn(user) => Some(user.clone()),
        },
    };
    let path = dir.join("account.json");
    match serde_json::to_string_pretty(&account) {
        Ok(data) => {
            if let Err(e) = fs::write(&path, data) {
                eprintln!("Failed to save account file: {e}");
            }
        }
        Err(e) => eprintln!("Failed to encode account file: {e}"),
    }
}

/// Parse a day argument: "today", "tomorrow", "yesterday", or YYYY-MM-DD.
pub fn parse_day_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();
    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {}
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn day_or_today(arg: Option<String>) -> NaiveDate {
    match arg {
        None => Local::now().date_naive(),
        Some(s) => match parse_day_input(&s) {
            Some(day) => day,
            None => {
                eprintln!("Unrecognised day: {s}");
                std::process::exit(1);
            }
        },
    }
}

/// Resolve a task identifier (id prefix or exact title) to a task id.
/// Returns an error when nothing matches or the prefix is ambiguous.
pub fn resolve_task(identifier: &str, session: &Session) -> Result<Uuid, String> {
    let lowered = identifier.to_lowercase();
    let matches: Vec<&TaskItem> = session
        .tasks()
        .iter()
        .filter(|t| {
            t.id.to_string().starts_with(&lowered) || t.title.eq_ignore_ascii_case(identifier)
        })
        .collect();
    match matches.len() {
        0 => Err(format!("No task matches '{identifier}'")),
        1 => Ok(matches[0].id),
        _ => {
            let mut msg = format!("Multiple tasks match '{identifier}':\n");
            for task in matches {
                msg.push_str(&format!("  {} - {}\n", task.id, task.title));
            }
            msg.push_str("Use a longer id prefix.");
            Err(msg)
        }
    }
}

fn resolve_or_exit(identifier: &str, session: &Session) -> Uuid {
    match resolve_task(identifier, session) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    }
}

/// Build a recurrence rule from CLI arguments.
fn build_schedule(repeat: RepeatKind, date: Option<String>, on: &[String]) -> Result<Schedule, String> {
    match repeat {
        RepeatKind::Once => {
            let raw = date.ok_or_else(|| "--date is required for a one-time task".to_string())?;
            let date =
                parse_day_input(&raw).ok_or_else(|| format!("Unrecognised date: {raw}"))?;
            Ok(Schedule::Once { date })
        }
        RepeatKind::Daily => Ok(Schedule::Daily),
        RepeatKind::Weekdays => Ok(Schedule::Weekdays),
        RepeatKind::Weekends => Ok(Schedule::Weekends),
        RepeatKind::Custom => {
            let days = parse_weekdays(on)?;
            if days.is_empty() {
                return Err("--on is required for a custom repeat".to_string());
            }
            Ok(Schedule::Custom { days })
        }
    }
}

/// Format a recurrence rule for table display.
pub fn format_schedule(schedule: &Schedule) -> String {
    match schedule {
        Schedule::Once { date } => format!("once {}", day_key(*date)),
        Schedule::Daily => "daily".into(),
        Schedule::Weekdays => "weekdays".into(),
        Schedule::Weekends => "weekends".into(),
        Schedule::Custom { days } => {
            let names: Vec<String> = days.iter().map(|d| d.to_string().to_lowercase()).collect();
            format!("on {}", names.join(","))
        }
    }
}

/// Add a new task to the active account.
pub fn cmd_add(
    session: &mut Session,
    title: String,
    notes: Option<String>,
    repeat: RepeatKind,
    date: Option<String>,
    on: Vec<String>,
    remind: Option<String>,
) {
    let schedule = match build_schedule(repeat, date, &on) {
        Ok(schedule) => schedule,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let mut task = TaskItem::new(title, schedule);
    if let Some(notes) = notes {
        task.notes = notes;
    }
    if let Some(raw) = remind {
        match NaiveTime::parse_from_str(&raw, "%H:%M") {
            Ok(time) => task.reminder_time = Some(time),
            Err(_) => {
                eprintln!("Unrecognised reminder time (expected HH:MM): {raw}");
                std::process::exit(1);
            }
        }
    }
    let id = task.id;
    session.upsert(task);
    println!("Added task {id}");
}

/// List tasks visible on a day, or every task with --all.
pub fn cmd_list(session: &Session, day: Option<String>, all: bool) {
    let day = day_or_today(day);
    let tasks: Vec<&TaskItem> = if all {
        session.tasks().iter().collect()
    } else {
        session.visible_tasks(day)
    };
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    println!(
        "{:<10} {:<5} {:<16} {:<7} {}",
        "ID", "Done", "Repeat", "Remind", "Title"
    );
    for task in tasks {
        let done = if session.completed(task.id, day) { "x" } else { "-" };
        let remind = task
            .reminder_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".into());
        let id = task.id.to_string();
        println!(
            "{:<10} {:<5} {:<16} {:<7} {}",
            &id[..8],
            done,
            format_schedule(&task.schedule),
            remind,
            task.title
        );
    }
}

/// Toggle completion for a task on a day.
pub fn cmd_done(session: &mut Session, id: String, day: Option<String>) {
    let day = day_or_today(day);
    let task_id = resolve_or_exit(&id, session);
    session.toggle_completion(task_id, day);
    if session.completed(task_id, day) {
        println!("Completed {} on {}", task_id, day_key(day));
    } else {
        println!("Reopened {} on {}", task_id, day_key(day));
    }
}

/// Skip one occurrence of a recurring task.
pub fn cmd_skip(session: &mut Session, id: String, day: Option<String>) {
    let day = day_or_today(day);
    let task_id = resolve_or_exit(&id, session);
    session.delete_occurrence(task_id, day);
    println!("Skipped {} on {}", task_id, day_key(day));
}

/// Move a visible task to a new position in the day's list.
pub fn cmd_move(session: &mut Session, id: String, to: usize, day: Option<String>) {
    let day = day_or_today(day);
    let task_id = resolve_or_exit(&id, session);
    let visible_ids: Vec<Uuid> = session.visible_tasks(day).iter().map(|t| t.id).collect();
    let Some(from) = visible_ids.iter().position(|&v| v == task_id) else {
        eprintln!("Task {} is not visible on {}", task_id, day_key(day));
        std::process::exit(1);
    };
    let mut offsets = BTreeSet::new();
    offsets.insert(from);
    session.move_tasks(&visible_ids, &offsets, to);
    println!("Moved.");
}

/// Delete a task entirely.
pub fn cmd_rm(session: &mut Session, id: String) {
    let task_id = resolve_or_exit(&id, session);
    session.delete(task_id);
    println!("Deleted {task_id}");
}

/// Clear every completion marker for a day.
pub fn cmd_reset(session: &mut Session, day: Option<String>) {
    let day = day_or_today(day);
    session.reset_completions(day);
    println!("Cleared completions for {}", day_key(day));
}

/// Record that a preset was created from a task.
pub fn cmd_preset(session: &mut Session, id: String) {
    let task_id = resolve_or_exit(&id, session);
    session.mark_preset_created(task_id);
    println!("Preset recorded for {task_id}");
}

/// Show the completion streak ending today.
pub fn cmd_streak(session: &Session) {
    let today = Local::now().date_naive();
    let streak = session.streak_through(today);
    println!("{streak} day streak");
}

/// Sign in and switch to the user's partition.
pub fn cmd_login(dir: &Path, session: &mut Session, user: String) {
    let auth = AuthState::SignedIn(user.clone());
    save_auth_state(dir, &auth);
    session.apply_auth_state(&auth);
    println!("Signed in as {} ({})", user, session.namespace().key());
}

/// Sign out and switch back to guest data.
pub fn cmd_logout(dir: &Path, session: &mut Session) {
    let auth = AuthState::SignedOut;
    save_auth_state(dir, &auth);
    session.apply_auth_state(&auth);
    println!("Signed out; using guest data.");
}

/// Show the active account partition.
pub fn cmd_whoami(session: &Session) {
    println!("{}", session.namespace().key());
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
