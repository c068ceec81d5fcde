// Organize interactor - Selects episode titles from ripped discs and queues them

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config_initialization::Settings;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::Utils;

#[derive(Debug, Clone, Default)]
pub struct OrganizeRequest {
    pub dry_run: bool,
}

/// Titles kept from one disc directory
#[derive(Debug, Clone, Serialize)]
pub struct DiscSelection {
    pub disc: PathBuf,
    pub selected: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizeResponse {
    pub dry_run: bool,
    pub discs: Vec<DiscSelection>,
    pub assignments: Vec<EpisodeAssignment>,
}

/// Interactor for the organize use case
pub struct OrganizeInteractor {
    fs_port: Arc<dyn FsPort>,
    rips_root: PathBuf,
    rip_dir_prefix: String,
    library_dir: PathBuf,
    queue_dir: PathBuf,
    window: SizeWindow,
    disc_episode_counts: Vec<usize>,
    catalog: EpisodeCatalog,
}

impl OrganizeInteractor {
    pub fn new(fs_port: Arc<dyn FsPort>, settings: &Settings) -> Result<Self, DomainError> {
        Ok(Self {
            fs_port,
            rips_root: settings.paths.rips_root.clone(),
            rip_dir_prefix: settings.paths.rip_dir_prefix.clone(),
            library_dir: settings.paths.library_dir.clone(),
            queue_dir: settings.paths.to_be_processed_dir.clone(),
            window: settings.selection.size_window()?,
            disc_episode_counts: settings.selection.disc_episode_counts.clone(),
            catalog: settings.catalog()?,
        })
    }

    /// Select, validate and assign every title before any file is copied
    pub async fn execute(&self, request: OrganizeRequest) -> Result<OrganizeResponse, DomainError> {
        info!("Organizing rips under {}", self.rips_root.display());

        let discs = self.disc_directories().await?;
        let mut selections = Vec::with_capacity(discs.len());
        let mut selected_files = Vec::new();

        for (index, disc) in discs.iter().enumerate() {
            let disc = self.underscore_path(disc, request.dry_run).await?;
            let files = self.disc_files(&disc, request.dry_run).await?;
            let selected = EpisodeSelector::select_consecutive(&files, self.window);

            DiscCountValidator::validate(
                &disc.renamed,
                index,
                selected.len(),
                &self.disc_episode_counts,
            )?;
            info!(
                "{}: {} of {} titles selected",
                disc.renamed.display(),
                selected.len(),
                files.len()
            );

            selections.push(DiscSelection {
                disc: disc.renamed.clone(),
                selected: selected.iter().map(|file| file.path.clone()).collect(),
            });
            selected_files.extend(selected);
        }

        let assignments =
            EpisodeAssigner::assign(&selected_files, &self.catalog, &self.library_dir, &self.queue_dir)?;

        if !request.dry_run {
            for assignment in &assignments {
                self.place(assignment).await?;
            }
        }

        info!("{} episodes organized", assignments.len());
        Ok(OrganizeResponse {
            dry_run: request.dry_run,
            discs: selections,
            assignments,
        })
    }

    async fn disc_directories(&self) -> Result<Vec<PathBuf>, DomainError> {
        Ok(self
            .fs_port
            .list_directories(&self.rips_root)
            .await?
            .into_iter()
            .filter(|dir| {
                dir.file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(&self.rip_dir_prefix))
            })
            .collect())
    }

    /// Files of a disc directory under their underscored names
    async fn disc_files(&self, disc: &Renamed, dry_run: bool) -> Result<Vec<FileEntry>, DomainError> {
        let mut files = Vec::new();
        for entry in self.fs_port.list_files(disc.current()).await? {
            let renamed = self.underscore_path(&entry.path, dry_run).await?;
            let Some(name) = renamed.renamed.file_name() else {
                continue;
            };
            debug!("{} ({})", renamed.renamed.display(), Utils::format_file_size(entry.size));
            files.push(FileEntry {
                path: disc.renamed.join(name),
                size: entry.size,
            });
        }
        Ok(files)
    }

    /// Replace spaces in the last path component, renaming on disk unless `dry_run`
    async fn underscore_path(&self, path: &Path, dry_run: bool) -> Result<Renamed, DomainError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let renamed = path.with_file_name(NamingRules::underscored(&name));

        let applied = renamed.as_path() != path && !dry_run;
        if applied {
            info!("Renaming {} to {}", path.display(), renamed.display());
            self.fs_port.move_path(path, &renamed).await?;
        }

        Ok(Renamed {
            original: path.to_path_buf(),
            renamed,
            applied,
        })
    }

    async fn place(&self, assignment: &EpisodeAssignment) -> Result<(), DomainError> {
        info!(
            "Episode {}: copying {} to {}",
            assignment.episode,
            assignment.source.display(),
            assignment.library_copy.display()
        );
        self.fs_port
            .copy_file(&assignment.source, &assignment.library_copy)
            .await?;

        info!(
            "Episode {}: moving {} to {}",
            assignment.episode,
            assignment.source.display(),
            assignment.queue_entry.display()
        );
        self.fs_port
            .move_path(&assignment.source, &assignment.queue_entry)
            .await
    }
}

/// A path before and after underscoring
struct Renamed {
    original: PathBuf,
    renamed: PathBuf,
    applied: bool,
}

impl Renamed {
    /// Where the entry currently lives on disk
    fn current(&self) -> &Path {
        if self.applied {
            &self.renamed
        } else {
            &self.original
        }
    }
}
