//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::toml_config::TomlConfigAdapter;
use crate::domain::errors::DomainError;
use crate::domain::model::{EpisodeCatalog, EpisodeEntry, SizeWindow};

/// Files tried in order when no config path is given
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["ripsplit.toml", "config/ripsplit.toml"];

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub selection: SelectionSettings,
    pub tools: ToolSettings,
    pub pipeline: PipelineSettings,
    pub episodes: Vec<EpisodeEntry>,
}

/// Directory layout of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding one sub-directory per ripped disc
    pub rips_root: PathBuf,
    /// Only disc directories starting with this prefix are organized
    pub rip_dir_prefix: String,
    /// Media library receiving a copy of each episode under its catalog title
    pub library_dir: PathBuf,
    pub to_be_processed_dir: PathBuf,
    pub intermediate_dir: PathBuf,
    pub ready_to_edit_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            rips_root: PathBuf::from("rips"),
            rip_dir_prefix: String::new(),
            library_dir: PathBuf::from("library"),
            to_be_processed_dir: PathBuf::from("1_ToBeProcessed"),
            intermediate_dir: PathBuf::from("2_Intermediate"),
            ready_to_edit_dir: PathBuf::from("3_ReadyToEdit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Titles at or below this size (MiB) are extras, not episodes
    pub min_size_mb: u64,
    /// Titles at or above this size (MiB) are compilations, not episodes
    pub max_size_mb: u64,
    /// Expected episode count per disc directory, in directory order
    pub disc_episode_counts: Vec<usize>,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            min_size_mb: 4608,
            max_size_mb: 9216,
            disc_episode_counts: Vec::new(),
        }
    }
}

impl SelectionSettings {
    pub fn size_window(&self) -> Result<SizeWindow, DomainError> {
        SizeWindow::from_megabytes(self.min_size_mb, self.max_size_mb)
    }
}

/// Program names or paths of the external tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub mkvinfo: String,
    pub mkvextract: String,
    pub mkvmerge: String,
    pub ffmpeg: String,
    pub dotnet: String,
    /// Path of `PgsToSrt.dll`, run through `dotnet`
    pub pgs_to_srt: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            mkvinfo: "mkvinfo".to_string(),
            mkvextract: "mkvextract".to_string(),
            mkvmerge: "mkvmerge".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            dotnet: "dotnet".to_string(),
            pgs_to_srt: "PgsToSrt.dll".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Concurrent tool processes per stage; 0 means one per logical CPU
    pub max_jobs: usize,
    pub keep_intermediate: bool,
    pub continue_on_error: bool,
    /// Audio codec IDs transcoded to FLAC; other audio is extracted as-is
    pub transcode_audio_codecs: Vec<String>,
    /// Tesseract language used when a subtitle track has no usable tag
    pub ocr_fallback_language: String,
    /// `-analyzeduration` passed to ffmpeg for raw audio streams (microseconds)
    pub analyze_duration: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_jobs: 0,
            keep_intermediate: false,
            continue_on_error: false,
            transcode_audio_codecs: vec!["A_TRUEHD".to_string()],
            ocr_fallback_language: "eng".to_string(),
            analyze_duration: 30_000_000,
        }
    }
}

impl PipelineSettings {
    /// Job limit with the "one per CPU" default resolved
    pub fn effective_jobs(&self) -> usize {
        if self.max_jobs == 0 {
            num_cpus::get().max(1)
        } else {
            self.max_jobs
        }
    }
}

impl Settings {
    pub fn catalog(&self) -> Result<EpisodeCatalog, DomainError> {
        EpisodeCatalog::from_entries(&self.episodes)
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), DomainError> {
        self.selection.size_window()?;
        self.catalog()?;
        if self.pipeline.ocr_fallback_language.trim().is_empty() {
            return Err(DomainError::ConfigError(
                "ocr_fallback_language cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub max_jobs: Option<usize>,
    pub keep_intermediate: bool,
    pub continue_on_error: bool,
}

/// Build the effective settings from every configuration layer
pub fn initialize_configuration_hierarchy(overrides: &CliOverrides) -> Result<Settings, DomainError> {
    info!("Initializing configuration hierarchy");

    let mut settings = match locate_config_file(overrides.config_path.as_deref())? {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load(&path)?
        }
        None => {
            info!("No configuration file found, using defaults");
            Settings::default()
        }
    };

    let env_overrides = apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut settings, overrides);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    settings.validate()?;
    Ok(settings)
}

/// Pick the config file: an explicit path must exist, search paths may not
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, DomainError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(DomainError::ConfigError(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    Ok(CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists()))
}

/// Apply `RIPSPLIT_*` variables obtained through `lookup`; returns how many applied
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;

    let path_mappings: [(&str, &mut PathBuf); 5] = [
        ("RIPSPLIT_RIPS_ROOT", &mut settings.paths.rips_root),
        ("RIPSPLIT_LIBRARY_DIR", &mut settings.paths.library_dir),
        ("RIPSPLIT_TO_BE_PROCESSED_DIR", &mut settings.paths.to_be_processed_dir),
        ("RIPSPLIT_INTERMEDIATE_DIR", &mut settings.paths.intermediate_dir),
        ("RIPSPLIT_READY_TO_EDIT_DIR", &mut settings.paths.ready_to_edit_dir),
    ];
    for (env_var, target) in path_mappings {
        if let Some(value) = lookup(env_var) {
            debug!("Found environment override: {} = {}", env_var, value);
            *target = PathBuf::from(value);
            applied += 1;
        }
    }

    let tool_mappings: [(&str, &mut String); 6] = [
        ("RIPSPLIT_MKVINFO", &mut settings.tools.mkvinfo),
        ("RIPSPLIT_MKVEXTRACT", &mut settings.tools.mkvextract),
        ("RIPSPLIT_MKVMERGE", &mut settings.tools.mkvmerge),
        ("RIPSPLIT_FFMPEG", &mut settings.tools.ffmpeg),
        ("RIPSPLIT_DOTNET", &mut settings.tools.dotnet),
        ("RIPSPLIT_PGS_TO_SRT", &mut settings.tools.pgs_to_srt),
    ];
    for (env_var, target) in tool_mappings {
        if let Some(value) = lookup(env_var) {
            debug!("Found environment override: {} = {}", env_var, value);
            *target = value;
            applied += 1;
        }
    }

    if let Some(value) = lookup("RIPSPLIT_MAX_JOBS") {
        settings.pipeline.max_jobs = value.trim().parse().map_err(|e| {
            DomainError::ConfigError(format!("Invalid RIPSPLIT_MAX_JOBS '{}': {}", value, e))
        })?;
        applied += 1;
    }

    Ok(applied)
}

/// Apply CLI arguments; returns how many applied
pub fn apply_cli_overrides(settings: &mut Settings, overrides: &CliOverrides) -> usize {
    let mut applied = 0;

    if let Some(jobs) = overrides.max_jobs {
        debug!("CLI override: max_jobs = {}", jobs);
        settings.pipeline.max_jobs = jobs;
        applied += 1;
    }
    if overrides.keep_intermediate {
        debug!("CLI override: keep_intermediate = true");
        settings.pipeline.keep_intermediate = true;
        applied += 1;
    }
    if overrides.continue_on_error {
        debug!("CLI override: continue_on_error = true");
        settings.pipeline.continue_on_error = true;
        applied += 1;
    }

    applied
}
