//! Cortex Manager CLI
//!
//! The command-line interface for reconciling tenant rule and alerting
//! configuration against a Cortex-compatible rules engine.

mod cli;
mod commands;
mod error;
mod manifest;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Check => commands::run_check(&cli.manifest, cli.config.as_deref()).await,
        Commands::Sync { dry_run } => {
            commands::run_sync(&cli.manifest, cli.config.as_deref(), dry_run).await
        }
        Commands::Delete => commands::run_delete(&cli.manifest, cli.config.as_deref()).await,
    }
}
