// TOML config adapter - Configuration management using TOML files

use std::path::Path;

use crate::config_initialization::Settings;
use crate::domain::errors::*;

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load settings from a TOML file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Settings, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    /// Deserialize settings from a TOML string
    pub fn parse(toml_content: &str) -> Result<Settings, DomainError> {
        toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse TOML config: {}", e)))
    }

    /// Serialize settings to a TOML string
    pub fn serialize(settings: &Settings) -> Result<String, DomainError> {
        toml::to_string_pretty(settings)
            .map_err(|e| DomainError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Write settings to `path`, creating parent directories
    pub fn save(settings: &Settings, path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::FsFail(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = Self::serialize(settings)?;
        std::fs::write(path, content)
            .map_err(|e| DomainError::FsFail(format!("Failed to write config file: {}", e)))
    }
}
