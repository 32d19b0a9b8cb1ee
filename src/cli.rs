use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Account-scoped daily task tracker.
/// State lives under ~/.daytrack or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "dt", version, about = "Daily task and focus tracking CLI")]
pub struct Cli {
    /// Data directory holding the per-account state files.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
