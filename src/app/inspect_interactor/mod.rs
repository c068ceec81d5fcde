// Inspect interactor - Orchestrates track inventory use case

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::probe;

/// What to read the track inventory from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectSource {
    /// Run `mkvinfo` on a container
    Container(PathBuf),
    /// Parse a previously saved `mkvinfo` report
    Report(PathBuf),
}

#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub source: InspectSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectResponse {
    pub source: PathBuf,
    pub inventory: ContainerTrackInventory,
}

/// Interactor for the inspect use case
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
}

impl InspectInteractor {
    pub fn new(probe_port: Arc<dyn ProbePort>, fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            probe_port,
            fs_port,
        }
    }

    pub async fn execute(&self, request: InspectRequest) -> Result<InspectResponse, DomainError> {
        let (source, inventory) = match request.source {
            InspectSource::Container(path) => {
                self.ensure_exists(&path).await?;
                let inventory = self.probe_port.inspect(&path).await?;
                (path, inventory)
            }
            InspectSource::Report(path) => {
                self.ensure_exists(&path).await?;
                let report = self.fs_port.read_to_string(&path).await?;
                let inventory = probe::parse_report(&probe::normalize_line_endings(&report))?;
                info!(
                    "Parsed saved report {}: {} tracks",
                    path.display(),
                    inventory.total_tracks()
                );
                (path, inventory)
            }
        };

        Ok(InspectResponse { source, inventory })
    }

    async fn ensure_exists(&self, path: &std::path::Path) -> Result<(), DomainError> {
        if !self.fs_port.exists(path).await? {
            return Err(DomainError::FsFail(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }
        Ok(())
    }
}
