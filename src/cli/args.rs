//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgGroup, Args};

use crate::output::OutputFormat;

/// Arguments for the inspect command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "report"])))]
pub struct InspectArgs {
    /// Matroska container to run mkvinfo on
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Saved mkvinfo report to parse instead
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Single container to process (default: every .mkv in the queue directory)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the intermediate directory of each episode
    #[arg(long)]
    pub keep_intermediate: bool,

    /// Carry on with the next container after a failure
    #[arg(long)]
    pub continue_on_error: bool,

    /// Output format of the run report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the organize command
#[derive(Args, Debug)]
pub struct OrganizeArgs {
    /// Show the selection without renaming, copying or moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the effective configuration to this file instead of stdout
    #[arg(long)]
    pub write: Option<PathBuf>,
}
