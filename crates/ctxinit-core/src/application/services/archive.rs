//! Archive naming and the move-into-archive operation.
//!
//! Archived copies live under a dot-directory inside the target root, named
//! `<original relative path>.<YYYYmmdd-HHMMSS>-<seq>`. The sequence counter
//! makes names unique even when several files are archived within the same
//! clock second, and an existence probe covers counters reset across runs.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use tracing::debug;

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::{DomainError, RelativePath};
use crate::error::CtxResult;

/// Default archive directory name, directly under the target root.
pub const ARCHIVE_DIR: &str = ".ctxinit-archive";

/// Allocates collision-free archive destinations and performs the move.
pub struct ArchiveManager {
    dir: RelativePath,
    seq: AtomicU64,
}

impl Default for ArchiveManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveManager {
    pub fn new() -> Self {
        Self {
            dir: RelativePath::new(ARCHIVE_DIR),
            seq: AtomicU64::new(0),
        }
    }

    /// The archive directory, relative to the target root.
    pub fn dir(&self) -> &RelativePath {
        &self.dir
    }

    /// Pick the next free destination for `path`.
    ///
    /// `is_taken` reports whether a candidate already exists; the sequence
    /// counter advances past taken names so two archives of the same file in
    /// the same second never collide.
    pub fn next_destination(
        &self,
        path: &RelativePath,
        is_taken: impl Fn(&RelativePath) -> bool,
    ) -> CtxResult<RelativePath> {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        loop {
            let seq = self.seq.fetch_add(1, Ordering::Relaxed);
            let candidate = RelativePath::try_new(format!(
                "{}/{}.{stamp}-{seq}",
                self.dir.as_str(),
                path.as_str()
            ))?;
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Move the file at `path` (relative to `root`) into the archive.
    ///
    /// Returns the archive destination, relative to the root.
    pub fn archive(
        &self,
        fs: &dyn Filesystem,
        root: &Path,
        path: &RelativePath,
    ) -> CtxResult<RelativePath> {
        let dest = self.next_destination(path, |c| fs.lexists(&root.join(c)))?;
        self.ensure_contained(fs, root, &dest)?;

        let abs_dest = root.join(&dest);
        if let Some(parent) = abs_dest.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.rename(&root.join(path), &abs_dest)
            .map_err(|e| ApplicationError::ArchiveFailed {
                path: path.as_path().to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(from = %path, to = %dest, "archived file");
        Ok(dest)
    }

    /// The archive tree is subject to the same containment rule as every
    /// other write: the deepest existing ancestor of the destination must
    /// resolve inside the root. A symlinked archive directory would
    /// otherwise turn an archive into a move out of the tree.
    fn ensure_contained(
        &self,
        fs: &dyn Filesystem,
        root: &Path,
        dest: &RelativePath,
    ) -> CtxResult<()> {
        let mut ancestor = root.to_path_buf();
        let mut current = dest.parent();
        while let Some(dir) = current {
            let abs = root.join(&dir);
            if fs.exists(&abs) {
                ancestor = abs;
                break;
            }
            current = dir.parent();
        }

        let canonical_root = fs.canonicalize(root)?;
        let resolved = fs.canonicalize(&ancestor)?;
        if !resolved.starts_with(&canonical_root) {
            return Err(DomainError::PathEscape {
                path: dest.as_str().to_string(),
            }
            .into());
        }
        Ok(())
    }
}
