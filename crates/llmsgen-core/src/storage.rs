//! Filesystem access to the build output directory.
//!
//! All writes go through a temporary file in the destination directory that is
//! renamed into place, so readers never observe a half-written artifact or
//! index document.

use crate::paths::markdown_path;
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// The build output directory that artifacts and index documents live in.
#[derive(Debug, Clone)]
pub struct Storage {
    root_dir: PathBuf,
}

impl Storage {
    /// Open an existing output directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `root_dir` is not a directory.
    pub fn open(root_dir: impl Into<PathBuf>) -> Result<Self> {
        let root_dir = root_dir.into();
        if !root_dir.is_dir() {
            return Err(Error::NotFound(format!(
                "build output directory {}",
                root_dir.display()
            )));
        }
        Ok(Self { root_dir })
    }

    /// The output root.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Path of the Markdown artifact for a page URL.
    #[must_use]
    pub fn artifact_path(&self, url: &str) -> PathBuf {
        markdown_path(&self.root_dir, url)
    }

    /// Create the parent directory of every given artifact path.
    ///
    /// Each distinct directory is created once, so the parallel conversion
    /// phase never has to touch directories. Returns the number of distinct
    /// directories.
    pub fn ensure_parent_dirs<'a, I>(&self, paths: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let dirs: BTreeSet<&Path> = paths.into_iter().filter_map(Path::parent).collect();
        for dir in &dirs {
            fs::create_dir_all(dir).map_err(|e| {
                Error::Storage(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }
        debug!(count = dirs.len(), "prepared output directories");
        Ok(dirs.len())
    }

    /// Atomically write the artifact for `url`.
    pub fn write_artifact(&self, url: &str, markdown: &str) -> Result<PathBuf> {
        let path = self.artifact_path(url);
        write_atomic(&path, markdown)?;
        Ok(path)
    }

    /// Read the artifact for `url`.
    pub fn read_artifact(&self, url: &str) -> Result<String> {
        Ok(fs::read_to_string(self.artifact_path(url))?)
    }

    /// Atomically write an index document into the output root.
    pub fn write_document(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root_dir.join(file_name);
        write_atomic(&path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "wrote index document");
        Ok(path)
    }

    /// Copy a document from the output root to the directory above it.
    ///
    /// A relative root with a single component publishes to the working
    /// directory. Returns `None` when the output root is a filesystem root.
    pub fn publish_to_parent(&self, file_name: &str) -> Result<Option<PathBuf>> {
        let Some(parent) = self.root_dir.parent() else {
            return Ok(None);
        };
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        let content = fs::read_to_string(self.root_dir.join(file_name))?;
        let target = parent.join(file_name);
        write_atomic(&target, &content)?;
        debug!(path = %target.display(), "published to parent directory");
        Ok(Some(target))
    }
}

/// Write `content` to `path` through a temporary sibling file and a rename.
///
/// # Errors
///
/// Returns [`Error::Storage`] if either the write or the rename fails. The
/// temporary file is removed when the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Storage(format!("Not a file path: {}", path.display())))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content).map_err(|e| {
        Error::Storage(format!("Failed to write {}: {e}", tmp_path.display()))
    })?;

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            Error::Storage(format!("Failed to remove existing {}: {e}", path.display()))
        })?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::Storage(format!(
            "Failed to commit {}: {e}",
            path.display()
        )));
    }
    Ok(())
}

/// Modification time of `path`, or `None` if it does not exist or the
/// platform does not report one.
#[must_use]
pub fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("_site");
        fs::create_dir_all(&root).unwrap();
        (Storage::open(root).unwrap(), temp_dir)
    }

    #[test]
    fn test_open_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = Storage::open(temp_dir.path().join("nope")).unwrap_err();
        assert_eq!(err.category(), "not_found");
    }

    #[test]
    fn test_ensure_parent_dirs_deduplicates() {
        let (storage, _dir) = create_test_storage();
        let paths = [
            storage.artifact_path("/en/a.html"),
            storage.artifact_path("/en/b.html"),
            storage.artifact_path("/en/ref/"),
        ];
        let created = storage
            .ensure_parent_dirs(paths.iter().map(PathBuf::as_path))
            .unwrap();

        assert_eq!(created, 2);
        assert!(storage.root_dir().join("en/ref").is_dir());
    }

    #[test]
    fn test_write_and_read_artifact() {
        let (storage, _dir) = create_test_storage();
        let path = storage.write_artifact("/", "# Home\n").unwrap();

        assert_eq!(path, storage.root_dir().join("index.html.md"));
        assert_eq!(storage.read_artifact("/").unwrap(), "# Home\n");
        assert!(!storage.root_dir().join("index.html.md.tmp").exists());
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let (storage, _dir) = create_test_storage();
        let path = storage.root_dir().join("llms.txt");
        write_atomic(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_missing_parent_is_storage_error() {
        let (storage, _dir) = create_test_storage();
        let err = write_atomic(&storage.root_dir().join("missing/x.md"), "x").unwrap_err();
        assert_eq!(err.category(), "storage");
    }

    #[test]
    fn test_publish_to_parent() {
        let (storage, dir) = create_test_storage();
        storage.write_document("llms.txt", "# Index\n").unwrap();

        let copied = storage.publish_to_parent("llms.txt").unwrap().unwrap();
        assert_eq!(copied, dir.path().join("llms.txt"));
        assert_eq!(fs::read_to_string(copied).unwrap(), "# Index\n");
    }

    #[test]
    fn test_modified_time() {
        let (storage, _dir) = create_test_storage();
        assert!(modified_time(&storage.root_dir().join("none")).is_none());
        let path = storage.write_document("a.txt", "a").unwrap();
        assert!(modified_time(&path).is_some());
    }
}
