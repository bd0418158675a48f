//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ctxinit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::CtxResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ctxinit_adapters::filesystem::LocalFilesystem` (production)
/// - `ctxinit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - All methods take absolute paths; joining against the target root and
///   containment checking happen in the services, before these are called
/// - `exists` follows symlinks, `lexists` does not; the engine needs both
///   to tell a dangling symlink from an absent file
pub trait Filesystem: Send + Sync {
    /// Check if path exists (following symlinks).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists without following a final symlink.
    fn lexists(&self, path: &Path) -> bool;

    /// Check if path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is itself a symlink.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Read a file to a string.
    fn read_to_string(&self, path: &Path) -> CtxResult<String>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> CtxResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CtxResult<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> CtxResult<()>;

    /// Remove a directory only if it is empty. `Ok(false)` when non-empty.
    fn remove_empty_dir(&self, path: &Path) -> CtxResult<bool>;

    /// Move a file (used for archiving).
    fn rename(&self, from: &Path, to: &Path) -> CtxResult<()>;

    /// Resolve symlinks and normalise the path. Errors if it does not exist.
    fn canonicalize(&self, path: &Path) -> CtxResult<PathBuf>;
}
