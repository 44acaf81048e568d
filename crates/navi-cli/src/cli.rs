//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Driver availability planner for Navi.
///
/// Decides which dates a driver may still change and keeps the hours
/// committed during one session.
#[derive(Debug, Parser)]
#[command(name = "navi", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show whether a date's availability can still be changed.
    Check {
        /// Date to check (YYYY-MM-DD, "tomorrow", "in 3 days", ...).
        date: String,
    },

    /// List every selectable date with its lock state.
    Calendar {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run a scheduling session from a script or stdin.
    Session {
        /// Read commands from this file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,

        /// Emit one JSON object per outcome.
        #[arg(long)]
        json: bool,
    },
}
