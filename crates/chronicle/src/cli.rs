//! CLI argument definitions

use chronicle_core::{LogLevel, DEFAULT_TAIL_LINES};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chronicle")]
#[command(version, about = "Date-rotated application logs with archiving and expiry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append an entry to today's log
    Write(WriteArgs),

    /// Archive aged logs and remove expired ones now
    Rotate(TargetArgs),

    /// Show the resolved name and directories
    Paths(TargetArgs),

    /// Show the last lines of today's log
    Tail(TailArgs),
}

/// Which logger to operate on
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Application name
    pub name: String,

    /// Log directory (default: resolved from environment and privileges)
    #[arg(long, env = "CHRONICLE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Base directory (default: resolved from environment and privileges)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Kebab-case the name, as an interpreted program would
    #[arg(long)]
    pub interpreted: bool,

    /// Config file (.toml, .yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Archive logs older than this many days
    #[arg(long)]
    pub archive_after_days: Option<u32>,

    /// Remove files older than this many days
    #[arg(long)]
    pub remove_after_days: Option<u32>,

    /// Let removal also expire .tar.gz archives
    #[arg(long)]
    pub expire_archives: bool,
}

#[derive(Args)]
pub struct WriteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Message text
    pub message: String,

    /// Level: debug, info, warn, error, critical, fatal
    #[arg(short, long, default_value = "info")]
    pub level: LogLevel,

    /// Component tag shown as @component
    #[arg(long)]
    pub component: Option<String>,
}

#[derive(Args)]
pub struct TailArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Number of lines to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_TAIL_LINES)]
    pub lines: usize,
}
