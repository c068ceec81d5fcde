// Local filesystem adapter - File system operations through std::fs

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new filesystem adapter
    pub fn new() -> Self {
        Self
    }

    /// Direct children of `dir` matching `keep`, sorted by file name
    fn children<F>(dir: &Path, keep: F) -> Result<Vec<walkdir::DirEntry>, DomainError>
    where
        F: Fn(&fs::FileType) -> bool,
    {
        let mut entries = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!("Failed to list {}: {}", dir.display(), e))
            })?;
            if keep(&entry.file_type()) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn ensure_parent(path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::FsFail(format!("Failed to create directory {}: {}", parent.display(), e))
            })?;
        }
        Ok(())
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.exists())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, DomainError> {
        fs::read_to_string(path)
            .map_err(|e| DomainError::FsFail(format!("Failed to read {}: {}", path.display(), e)))
    }

    async fn list_directories(&self, dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
        Ok(Self::children(dir, fs::FileType::is_dir)?
            .into_iter()
            .map(walkdir::DirEntry::into_path)
            .collect())
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<FileEntry>, DomainError> {
        Self::children(dir, fs::FileType::is_file)?
            .into_iter()
            .map(|entry| {
                let size = entry
                    .metadata()
                    .map_err(|e| {
                        DomainError::FsFail(format!(
                            "Failed to get file size of {}: {}",
                            entry.path().display(),
                            e
                        ))
                    })?
                    .len();
                Ok(FileEntry {
                    path: entry.into_path(),
                    size,
                })
            })
            .collect()
    }

    async fn create_directory(&self, dir: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir).map_err(|e| {
            DomainError::FsFail(format!("Failed to create directory {}: {}", dir.display(), e))
        })
    }

    async fn delete_directory(&self, dir: &Path) -> Result<(), DomainError> {
        fs::remove_dir_all(dir).map_err(|e| {
            DomainError::FsFail(format!("Failed to delete directory {}: {}", dir.display(), e))
        })
    }

    async fn move_path(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        Self::ensure_parent(to)?;
        fs::rename(from, to).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        Self::ensure_parent(to)?;
        fs::copy(from, to).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_is_sorted_and_typed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b_disc")).unwrap();
        fs::create_dir(dir.path().join("a_disc")).unwrap();
        fs::write(dir.path().join("t02.mkv"), b"12345").unwrap();
        fs::write(dir.path().join("t01.mkv"), b"1").unwrap();

        let adapter = FsLocalAdapter::new();
        let dirs = adapter.list_directories(dir.path()).await.unwrap();
        assert_eq!(dirs, vec![dir.path().join("a_disc"), dir.path().join("b_disc")]);

        let files = adapter.list_files(dir.path()).await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, dir.path().join("t01.mkv"));
        assert_eq!(files[1].size, 5);
    }

    #[tokio::test]
    async fn test_move_and_copy_create_parents() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mkv");
        fs::write(&source, b"data").unwrap();

        let adapter = FsLocalAdapter::new();
        let copy = dir.path().join("library").join("Show").join("copy.mkv");
        adapter.copy_file(&source, &copy).await.unwrap();
        assert!(copy.exists());

        let moved = dir.path().join("queue").join("moved.mkv");
        adapter.move_path(&source, &moved).await.unwrap();
        assert!(moved.exists());
        assert!(!adapter.exists(&source).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FsLocalAdapter::new()
            .read_to_string(&dir.path().join("missing.txt"))
            .await;
        assert!(matches!(result, Err(DomainError::FsFail(_))));
    }
}
