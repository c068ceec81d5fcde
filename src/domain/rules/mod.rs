// Domain rules - Title selection and naming policies

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::model::*;

/// File naming rules applied while organizing a rip
pub struct NamingRules;

impl NamingRules {
    /// Name with every space replaced by an underscore
    pub fn underscored(name: &str) -> String {
        name.replace(' ', "_")
    }

    /// Name of the processing queue entry for a catalog title
    pub fn processing_name(title: &str) -> String {
        title.replace(" - ", "-").replace(' ', "_")
    }

    /// Title number encoded in the last two characters of a file stem
    /// (`title_t07.mkv` is title 7)
    pub fn title_number(path: &Path) -> Option<u32> {
        let stem = path.file_stem()?.to_str()?;
        let split = stem.len().checked_sub(2)?;
        let digits = stem.get(split..)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

/// Picks the episode titles out of one disc directory
pub struct EpisodeSelector;

impl EpisodeSelector {
    /// Keep files whose size lies inside `window` and whose title numbers
    /// continue an unbroken run from the first kept file.
    ///
    /// `files` must already be sorted by name. Once an in-window file breaks
    /// the run, nothing else from the directory is kept.
    pub fn select_consecutive(files: &[FileEntry], window: SizeWindow) -> Vec<FileEntry> {
        let mut selected: Vec<FileEntry> = Vec::new();
        let mut stopped = false;

        for file in files.iter().filter(|file| window.contains(file.size)) {
            let Some(last) = selected.last() else {
                selected.push(file.clone());
                continue;
            };

            let continues_run = match (
                NamingRules::title_number(&last.path),
                NamingRules::title_number(&file.path),
            ) {
                (Some(previous), Some(current)) => previous + 1 == current,
                _ => false,
            };

            if continues_run && !stopped {
                selected.push(file.clone());
            } else {
                stopped = true;
            }
        }

        selected
    }
}

/// Checks selections against the expected episode count of each disc
pub struct DiscCountValidator;

impl DiscCountValidator {
    /// `disc_index` is the position of the disc directory in sorted order
    pub fn validate(
        disc: &Path,
        disc_index: usize,
        selected: usize,
        expected_counts: &[usize],
    ) -> Result<(), DomainError> {
        if expected_counts.is_empty() {
            return Ok(());
        }

        match expected_counts.get(disc_index) {
            Some(&expected) if expected == selected => Ok(()),
            Some(&expected) => Err(DomainError::ValidationFailed(format!(
                "{}: selected {} episodes, expected {}",
                disc.display(),
                selected,
                expected
            ))),
            None => Err(DomainError::ValidationFailed(format!(
                "{}: no expected episode count configured for disc {}",
                disc.display(),
                disc_index + 1
            ))),
        }
    }
}

/// Where one selected title goes once organized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeAssignment {
    pub episode: u32,
    pub title: String,
    pub source: PathBuf,
    pub library_copy: PathBuf,
    pub queue_entry: PathBuf,
}

/// Maps the concatenated selection onto catalog titles
pub struct EpisodeAssigner;

impl EpisodeAssigner {
    /// Episode numbers start at 1 and follow selection order
    pub fn assign(
        selected: &[FileEntry],
        catalog: &EpisodeCatalog,
        library_dir: &Path,
        queue_dir: &Path,
    ) -> Result<Vec<EpisodeAssignment>, DomainError> {
        selected
            .iter()
            .zip(1u32..)
            .map(|(file, episode)| {
                let title = catalog.title(episode).ok_or_else(|| {
                    DomainError::ValidationFailed(format!(
                        "No catalog title for episode {} ({})",
                        episode,
                        file.path.display()
                    ))
                })?;

                Ok(EpisodeAssignment {
                    episode,
                    title: title.to_string(),
                    source: file.path.clone(),
                    library_copy: library_dir.join(title),
                    queue_entry: queue_dir.join(NamingRules::processing_name(title)),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
