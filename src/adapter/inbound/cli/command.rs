//! Command-line interface definitions.
//!
//! The binary exercises the core offline: it reads upstream payloads saved to
//! disk and prints what the core decides about them.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

/// Freshness and liveness checks for motorsport data feeds
#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration file and print the TTL table
    Check,

    /// Decide whether any session in a schedule file is live
    Live(LiveArgs),

    /// Aggregate a position feed file into a ranked snapshot
    Snapshot(SnapshotArgs),
}

/// Arguments for the `live` subcommand.
#[derive(Args, Debug)]
pub struct LiveArgs {
    /// JSON array of session records from the schedule API
    #[arg(long)]
    pub sessions: PathBuf,

    /// Evaluate at this RFC 3339 instant instead of now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

/// Arguments for the `snapshot` subcommand.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// JSON array of position samples from the live-data API
    #[arg(long)]
    pub positions: PathBuf,

    /// Only print the leading N entries
    #[arg(long)]
    pub top: Option<usize>,
}
