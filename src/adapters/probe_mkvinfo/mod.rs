//! mkvinfo adapter for container inspection
//!
//! Captures the element dump printed by `mkvinfo` and hands it to the
//! positional parser in [`crate::probe`].

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::probe;

/// mkvinfo-based probe adapter
pub struct MkvinfoProbeAdapter {
    program: String,
    execute_port: Arc<dyn ExecutePort>,
}

impl MkvinfoProbeAdapter {
    /// Create new adapter invoking `program` through `execute_port`
    pub fn new(program: impl Into<String>, execute_port: Arc<dyn ExecutePort>) -> Self {
        Self {
            program: program.into(),
            execute_port,
        }
    }

    fn invocation(&self, file_path: &Path) -> ToolInvocation {
        ToolInvocation::new(self.program.clone())
            .arg(file_path.to_string_lossy())
            .warning_exit_code(MKVTOOLNIX_WARNING_EXIT)
    }
}

#[async_trait]
impl ProbePort for MkvinfoProbeAdapter {
    async fn raw_report(&self, file_path: &Path) -> Result<String, DomainError> {
        let output = self.execute_port.run_capture(&self.invocation(file_path)).await?;
        debug!(
            "{} printed {} bytes for {}",
            self.program,
            output.stdout.len(),
            file_path.display()
        );
        Ok(probe::normalize_line_endings(&output.stdout))
    }

    async fn inspect(&self, file_path: &Path) -> Result<ContainerTrackInventory, DomainError> {
        let report = self.raw_report(file_path).await?;
        let inventory = probe::parse_report(&report)?;

        info!(
            "{}: {} video, {} audio, {} subtitle tracks",
            file_path.display(),
            inventory.video().len(),
            inventory.audio().len(),
            inventory.subtitles().len()
        );
        Ok(inventory)
    }
}
