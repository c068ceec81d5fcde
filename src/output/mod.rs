//! Result rendering module
//!
//! Every command result serializes to JSON or YAML through serde; the text
//! format is a human-oriented summary built in [`text`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub mod text;

/// Output format of command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// A command result that can be printed in every [`OutputFormat`]
pub trait Render: Serialize {
    fn render_text(&self) -> String;

    fn render(&self, format: OutputFormat) -> Result<String, DomainError> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self).map_err(|e| {
                DomainError::InternalError(format!("JSON serialization failed: {}", e))
            }),
            OutputFormat::Yaml => serde_yaml::to_string(self).map_err(|e| {
                DomainError::InternalError(format!("YAML serialization failed: {}", e))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::InspectResponse;
    use crate::domain::model::*;
    use std::path::PathBuf;

    fn response() -> InspectResponse {
        InspectResponse {
            source: PathBuf::from("ep.mkv"),
            inventory: ContainerTrackInventory::from_tracks(vec![(
                TrackType::Audio,
                TrackRecord::new(1, "A_TRUEHD", "jpn").unwrap(),
            )]),
        }
    }

    #[test]
    fn test_json_output() {
        let json = response().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["inventory"]["audio"][0]["codec"], "A_TRUEHD");
        assert_eq!(value["inventory"]["audio"][0]["track_number"], 1);
        assert!(value["inventory"]["video"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_yaml_output() {
        let yaml = response().render(OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["inventory"]["audio"][0]["language"].as_str(), Some("jpn"));
    }
}
