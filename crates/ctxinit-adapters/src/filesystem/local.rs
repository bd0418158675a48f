//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use ctxinit_core::{application::ports::Filesystem, error::CtxResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn lexists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> CtxResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CtxResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> CtxResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_file(&self, path: &Path) -> CtxResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_empty_dir(&self, path: &Path) -> CtxResult<bool> {
        match std::fs::remove_dir(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => Ok(false),
            Err(e) => Err(map_io_error(path, e, "remove directory")),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> CtxResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "move file"))
    }

    fn canonicalize(&self, path: &Path) -> CtxResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| map_io_error(path, e, "resolve path"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ctxinit_core::error::CtxError {
    use ctxinit_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("AGENTS.md");

        fs.write_file(&path, "# Agents\n").unwrap();
        assert!(fs.is_file(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "# Agents\n");
    }

    #[test]
    fn remove_empty_dir_leaves_populated_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let sub = dir.path().join("docs");
        fs.create_dir_all(&sub).unwrap();
        fs.write_file(&sub.join("PROJECT.md"), "x").unwrap();

        assert!(!fs.remove_empty_dir(&sub).unwrap());
        fs.remove_file(&sub.join("PROJECT.md")).unwrap();
        assert!(fs.remove_empty_dir(&sub).unwrap());
        assert!(!fs.exists(&sub));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_detected_without_following() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let link = dir.path().join("CLAUDE.md");
        std::os::unix::fs::symlink("/nonexistent-target", &link).unwrap();

        assert!(fs.is_symlink(&link));
        assert!(fs.lexists(&link));
        // Dangling: following it finds nothing.
        assert!(!fs.exists(&link));
    }
}
