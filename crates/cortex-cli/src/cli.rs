//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cortex Manager - Reconcile tenant rule and alerting configuration
#[derive(Parser, Debug)]
#[command(name = "cortex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the desired-state manifest
    #[arg(short, long, global = true, default_value = "cortex.yaml")]
    pub manifest: PathBuf,

    /// Path to the connection config (defaults to the platform config dir)
    #[arg(short, long, global = true, env = "CORTEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Observe every declared object and report drift
    Check,

    /// Reconcile every declared object toward the manifest
    Sync {
        /// Preview actions without calling mutating endpoints
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove every declared object from the engine
    Delete,
}
