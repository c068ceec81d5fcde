// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

pub use crate::domain::model::FileEntry;

/// Port for container inspection
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Raw `mkvinfo`-style report for a container, CRLF-terminated
    async fn raw_report(&self, file_path: &Path) -> Result<String, DomainError>;

    /// Parsed track inventory of a container
    async fn inspect(&self, file_path: &Path) -> Result<ContainerTrackInventory, DomainError>;
}

/// Captured result of a finished tool process
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Port for running external tools
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run one invocation to completion and capture its output
    async fn run_capture(&self, invocation: &ToolInvocation) -> Result<ToolOutput, DomainError>;

    /// Start every invocation of a stage and wait for all of them.
    ///
    /// A failing invocation does not cancel its siblings; the first failure is
    /// reported once the whole stage has finished.
    async fn run_stage(&self, stage: &Stage) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if path exists
    async fn exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Read a whole text file
    async fn read_to_string(&self, path: &Path) -> Result<String, DomainError>;

    /// Sub-directories of `dir`, sorted by name
    async fn list_directories(&self, dir: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Regular files of `dir` with their sizes, sorted by name
    async fn list_files(&self, dir: &Path) -> Result<Vec<FileEntry>, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir: &Path) -> Result<(), DomainError>;

    /// Delete directory recursively
    async fn delete_directory(&self, dir: &Path) -> Result<(), DomainError>;

    /// Rename or move a file or directory, creating the destination parent
    async fn move_path(&self, from: &Path, to: &Path) -> Result<(), DomainError>;

    /// Copy file, creating the destination parent
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}
