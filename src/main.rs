//! ripsplit CLI
//!
//! Organizes ripped Blu-ray titles into episodes and splits each episode into
//! per-track files ready for editing.
//!
//! # Usage
//!
//! ```bash
//! ripsplit organize --dry-run
//! ripsplit inspect --input "Show-S01E0001-Pilot.mkv" --format json
//! ripsplit process --jobs 4
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ripsplit::adapters::{LogLevel, TracingLogAdapter};
use ripsplit::app::DefaultAppContainer;
use ripsplit::cli::{commands, Cli, Commands};
use ripsplit::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the ripsplit CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = LogLevel::parse(&cli.log_level)?;
    TracingLogAdapter::init(level, cli.log_json)?;

    let settings = initialize_configuration_hierarchy(&cli.overrides())
        .context("Failed to load configuration")?;

    let container = || DefaultAppContainer::new(&settings);
    match cli.command {
        Commands::Inspect(args) => commands::inspect(&container()?, args).await?,
        Commands::Process(args) => commands::process(&container()?, args).await?,
        Commands::Organize(args) => commands::organize(&container()?, args).await?,
        Commands::Config(args) => commands::config(&settings, args)?,
    }

    info!("ripsplit completed successfully");
    Ok(())
}
