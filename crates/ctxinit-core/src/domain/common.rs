use super::DomainError;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay inside whatever root it is joined to.
///
/// Invariants, enforced at construction:
/// - never absolute
/// - no `..` traversal segments
/// - no `.` segments and no drive/root prefixes
///
/// Every path the engine writes to, archives, or removes goes through this
/// type, so containment failures surface before any I/O is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new contained relative path.
    ///
    /// # Panics
    /// Panics if the path violates the containment invariant
    /// (use `try_new` for fallible construction).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::try_new(path).expect("RelativePath invariant violated")
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.as_os_str().is_empty() {
            return Err(DomainError::TraversalNotAllowed {
                path: String::from("(empty)"),
            });
        }
        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                // `.`/`..`/prefixes all allow an entry to address something
                // other than a strict descendant of the root.
                _ => {
                    return Err(DomainError::TraversalNotAllowed {
                        path: path.display().to_string(),
                    });
                }
            }
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or("")
    }

    /// Parent directory, if the path has one inside the root.
    pub fn parent(&self) -> Option<RelativePath> {
        self.0
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| Self(p.to_path_buf()))
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_relative_path_is_accepted() {
        let p = RelativePath::try_new("docs/PROJECT.md").unwrap();
        assert_eq!(p.as_str(), "docs/PROJECT.md");
    }

    #[test]
    fn absolute_path_is_rejected() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn traversal_segment_is_rejected() {
        assert!(matches!(
            RelativePath::try_new("../outside.md"),
            Err(DomainError::TraversalNotAllowed { .. })
        ));
        assert!(RelativePath::try_new("docs/../../escape").is_err());
    }

    #[test]
    fn curdir_segment_is_rejected() {
        assert!(RelativePath::try_new("./AGENTS.md").is_err());
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(RelativePath::try_new("").is_err());
    }

    #[test]
    fn parent_stops_at_root() {
        let p = RelativePath::new(".cursor/rules/project.mdc");
        let parent = p.parent().unwrap();
        assert_eq!(parent.as_str(), ".cursor/rules");
        assert_eq!(parent.parent().unwrap().as_str(), ".cursor");
        assert!(parent.parent().unwrap().parent().is_none());
    }
}
