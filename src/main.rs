//! # dt - daily task and focus tracker
//!
//! A file-backed daily task tracker with per-account storage partitions.
//! The data layer is the product: an ordered task list with per-day
//! completion markers, recurrence rules, soft per-day skips, and local
//! change markers for an external sync collaborator. The CLI is a thin
//! driver over that layer.
//!
//! ## Key behaviours
//!
//! - **Account partitions**: guest data and each signed-in user's data
//!   live in separate JSON files and never mix. `dt login` / `dt logout`
//!   switch partitions, cancelling and rescheduling reminders across the
//!   switch.
//! - **Stable ordering**: tasks display in `(sort_index, created_at)`
//!   order, renormalised to dense indices after every change.
//! - **Per-day completion**: `dt done` toggles a `(task, day)` marker;
//!   `dt streak` counts consecutive completed days.
//! - **Soft skips**: `dt skip` suppresses a single occurrence of a
//!   recurring task without deleting it.
//!
//! ## Quick start
//!
//! ```bash
//! dt add "Morning stretch" --repeat daily --remind 07:30
//! dt add "Review PRs" --repeat weekdays
//! dt list
//! dt done "Morning stretch"
//! dt streak
//! ```
//!
//! Data is stored locally in `~/.daytrack/`, one pair of JSON files per
//! account partition.

use std::path::PathBuf;

use clap::Parser;

pub mod changes;
pub mod cli;
pub mod cmd;
pub mod namespace;
pub mod order;
pub mod progress;
pub mod schedule;
pub mod session;
pub mod store;
pub mod task;

use cli::Cli;
use cmd::*;
use session::Session;

fn main() {
    let cli = Cli::parse();

    // Determine the data directory.
    let dir = if let Some(dir) = cli.dir {
        dir
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".daytrack")
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Failed to create data directory {}: {}", dir.display(), e);
        std::process::exit(1);
    }

    // Completions need no state.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let mut session = Session::open(dir.clone(), Box::new(NoopScheduler), Box::new(NoopSync));
    session.apply_auth_state(&load_auth_state(&dir));

    match cli.command {
        Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Add {
            title,
            notes,
            repeat,
            date,
            on,
            remind,
        } => cmd_add(&mut session, title, notes, repeat, date, on, remind),

        Commands::List { day, all } => cmd_list(&session, day, all),

        Commands::Done { id, day } => cmd_done(&mut session, id, day),

        Commands::Skip { id, day } => cmd_skip(&mut session, id, day),

        Commands::Move { id, to, day } => cmd_move(&mut session, id, to, day),

        Commands::Rm { id } => cmd_rm(&mut session, id),

        Commands::Reset { day } => cmd_reset(&mut session, day),

        Commands::Preset { id } => cmd_preset(&mut session, id),

        Commands::Streak => cmd_streak(&session),

        Commands::Login { user } => cmd_login(&dir, &mut session, user),

        Commands::Logout => cmd_logout(&dir, &mut session),

        Commands::Whoami => cmd_whoami(&session),
    }
}
