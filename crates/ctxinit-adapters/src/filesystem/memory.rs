//! In-memory filesystem adapter for testing.
//!
//! Supports plain files, directories, and symlinks (including symlinked
//! directories, which the engine's containment pre-flight exists to catch).
//! Clones share state, so a test can hand a `Box<dyn Filesystem>` to the
//! engine and keep a handle for assertions.

use std::{
    collections::{HashMap, HashSet},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use ctxinit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CtxResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    symlinks: HashMap<PathBuf, PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Register a symlink at `link` pointing at `target` (testing helper).
    pub fn add_symlink(&self, link: impl Into<PathBuf>, target: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        inner.symlinks.insert(link.into(), target.into());
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
        inner.symlinks.clear();
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystemInner {
    /// Substitute symlinked prefixes, one level deep per component.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::RootDir | Component::Prefix(_) | Component::Normal(_) => {
                    resolved.push(component);
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
            }
            if let Some(target) = self.symlinks.get(&resolved) {
                resolved = target.clone();
            }
        }
        resolved
    }

    fn entry_exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
            || self.directories.contains(path)
            || self.symlinks.contains_key(path)
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        let resolved = inner.resolve(path);
        inner.files.contains_key(&resolved) || inner.directories.contains(&resolved)
    }

    fn lexists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.entry_exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        let resolved = inner.resolve(path);
        inner.files.contains_key(&resolved)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        let resolved = inner.resolve(path);
        inner.directories.contains(&resolved)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.symlinks.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> CtxResult<String> {
        let inner = self.inner.read().unwrap();
        let resolved = inner.resolve(path);
        inner
            .files
            .get(&resolved)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> CtxResult<()> {
        let mut inner = self.inner.write().unwrap();

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            let resolved = inner.resolve(parent);
            if !parent.as_os_str().is_empty() && !inner.directories.contains(&resolved) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        let resolved = inner.resolve(path);
        inner.files.insert(resolved, content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> CtxResult<()> {
        let mut inner = self.inner.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            let resolved = inner.resolve(&current);
            if !inner.files.contains_key(&resolved) {
                inner.directories.insert(resolved);
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CtxResult<()> {
        let mut inner = self.inner.write().unwrap();
        let resolved = inner.resolve(path);
        if inner.files.remove(&resolved).is_none() {
            return Err(not_found(path));
        }
        Ok(())
    }

    fn remove_empty_dir(&self, path: &Path) -> CtxResult<bool> {
        let mut inner = self.inner.write().unwrap();
        let resolved = inner.resolve(path);
        if !inner.directories.contains(&resolved) {
            return Err(not_found(path));
        }
        let occupied = inner
            .files
            .keys()
            .chain(inner.symlinks.keys())
            .any(|p| p.starts_with(&resolved) && p != &resolved)
            || inner
                .directories
                .iter()
                .any(|p| p.starts_with(&resolved) && p != &resolved);
        if occupied {
            return Ok(false);
        }
        inner.directories.remove(&resolved);
        Ok(true)
    }

    fn rename(&self, from: &Path, to: &Path) -> CtxResult<()> {
        let mut inner = self.inner.write().unwrap();
        let from_resolved = inner.resolve(from);
        let Some(content) = inner.files.remove(&from_resolved) else {
            return Err(not_found(from));
        };
        let to_resolved = inner.resolve(to);
        inner.files.insert(to_resolved, content);
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> CtxResult<PathBuf> {
        let inner = self.inner.read().unwrap();
        let resolved = inner.resolve(path);
        if inner.files.contains_key(&resolved) || inner.directories.contains(&resolved) {
            Ok(resolved)
        } else {
            Err(not_found(path))
        }
    }
}

fn not_found(path: &Path) -> ctxinit_core::error::CtxError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/proj/docs/PROJECT.md"), "x").is_err());

        fs.create_dir_all(Path::new("/proj/docs")).unwrap();
        fs.write_file(Path::new("/proj/docs/PROJECT.md"), "x").unwrap();
        assert!(fs.is_file(Path::new("/proj/docs/PROJECT.md")));
    }

    #[test]
    fn symlinked_directory_redirects_resolution() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/proj")).unwrap();
        fs.create_dir_all(Path::new("/elsewhere")).unwrap();
        fs.add_symlink("/proj/docs", "/elsewhere");

        let resolved = fs.canonicalize(Path::new("/proj/docs")).unwrap();
        assert_eq!(resolved, PathBuf::from("/elsewhere"));
        assert!(fs.is_symlink(Path::new("/proj/docs")));
        assert!(fs.exists(Path::new("/proj/docs")));
    }

    #[test]
    fn rename_moves_content() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/proj")).unwrap();
        fs.write_file(Path::new("/proj/a.md"), "body").unwrap();
        fs.rename(Path::new("/proj/a.md"), Path::new("/proj/b.md"))
            .unwrap();

        assert!(!fs.lexists(Path::new("/proj/a.md")));
        assert_eq!(fs.read_file(Path::new("/proj/b.md")).unwrap(), "body");
    }

    #[test]
    fn remove_empty_dir_reports_occupancy() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/proj/docs")).unwrap();
        fs.write_file(Path::new("/proj/docs/x.md"), "x").unwrap();

        assert!(!fs.remove_empty_dir(Path::new("/proj/docs")).unwrap());
        fs.remove_file(Path::new("/proj/docs/x.md")).unwrap();
        assert!(fs.remove_empty_dir(Path::new("/proj/docs")).unwrap());
    }
}
