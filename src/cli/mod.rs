//! CLI module for ripsplit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::CliOverrides;

pub mod args;
pub mod commands;

/// ripsplit - Blu-ray rip organizer and per-track splitter
///
/// Selects episode titles from ripped discs, then splits every episode into
/// per-track files ready for editing: OCR'd subtitles, FLAC audio and an MP4
/// video stream.
#[derive(Parser, Debug)]
#[command(name = "ripsplit")]
#[command(about = "Split ripped Matroska episodes into edit-ready tracks")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, env = "RIPSPLIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Maximum concurrent tool processes per stage
    #[arg(long, global = true, value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the video, audio and subtitle tracks of a container
    Inspect(args::InspectArgs),
    /// Split queued containers into per-track files
    Process(args::ProcessArgs),
    /// Select episode titles from ripped discs and queue them for processing
    Organize(args::OrganizeArgs),
    /// Print or save the effective configuration
    Config(args::ConfigArgs),
}

impl Cli {
    /// Configuration overrides carried by the parsed arguments
    pub fn overrides(&self) -> CliOverrides {
        let (keep_intermediate, continue_on_error) = match &self.command {
            Commands::Process(args) => (args.keep_intermediate, args.continue_on_error),
            _ => (false, false),
        };

        CliOverrides {
            config_path: self.config.clone(),
            max_jobs: self.jobs,
            keep_intermediate,
            continue_on_error,
        }
    }
}

fn parse_jobs(value: &str) -> Result<usize, String> {
    clap_num::number_range(value, 1, 64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_process_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "ripsplit",
            "--jobs",
            "4",
            "process",
            "--keep-intermediate",
            "--dry-run",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.max_jobs, Some(4));
        assert!(overrides.keep_intermediate);
        assert!(!overrides.continue_on_error);
    }

    #[test]
    fn test_job_limit_is_bounded() {
        assert!(Cli::try_parse_from(["ripsplit", "--jobs", "0", "organize"]).is_err());
        assert!(Cli::try_parse_from(["ripsplit", "--jobs", "65", "organize"]).is_err());
    }

    #[test]
    fn test_inspect_requires_one_source() {
        assert!(Cli::try_parse_from(["ripsplit", "inspect"]).is_err());
        assert!(Cli::try_parse_from([
            "ripsplit", "inspect", "--input", "a.mkv", "--report", "a.txt"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["ripsplit", "inspect", "--report", "a.txt"]).is_ok());
    }
}
