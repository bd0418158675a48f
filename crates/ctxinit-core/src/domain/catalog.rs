//! Template catalog — the declarative set of files a scaffold installs.
//!
//! A [`TemplateCatalog`] is built once at startup (by the adapters crate for
//! the built-in set), validated, and then passed by value into every service
//! that needs it. There is deliberately no global or lazily-initialised
//! catalog: construction is explicit and the value is immutable afterwards.
//!
//! ## File flags
//!
//! | Flag        | Meaning                                                    |
//! |-------------|------------------------------------------------------------|
//! | `minimal`   | member of the minimal install subset                       |
//! | `removable` | `remove` may delete/archive it                             |
//! | `preserved` | never overwritten, under any policy (e.g. `.gitignore`)    |
//!
//! ## Placeholders
//!
//! Template bodies may contain `{{FACT_KEY}}` placeholders. Rendering
//! substitutes resolved facts and falls back to the literal sentinel
//! [`SENTINEL`] for anything unresolved — never an error.

use std::collections::HashSet;

use super::{DomainError, common::RelativePath};

/// Literal token left in rendered output when no fact resolves a placeholder.
///
/// The placeholder-residue health check looks for exactly this token, so the
/// scaffolder and the validator agree on what "unfilled" means.
pub const SENTINEL: &str = "TBD";

/// Which subset of the catalog an install operation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallMode {
    /// Every catalog file.
    #[default]
    Full,
    /// Only files flagged `minimal`.
    Minimal,
}

/// Source of template content: compile-time or runtime.
///
/// `Static` references binary data for the built-in catalog (zero-cost);
/// `Owned` exists for tests and future user-defined catalogs.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// One file the scaffold installs.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    path: RelativePath,
    content: TemplateSource,
    minimal: bool,
    removable: bool,
    preserved: bool,
}

impl TemplateFile {
    /// Create a file entry with default flags: full-mode only, removable,
    /// not preserved.
    pub fn new(path: impl Into<RelativePath>, content: impl Into<TemplateSource>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            minimal: false,
            removable: true,
            preserved: false,
        }
    }

    /// Include this file in the minimal subset.
    pub fn minimal(mut self) -> Self {
        self.minimal = true;
        self
    }

    /// Exclude this file from the removal path.
    pub fn not_removable(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Never overwrite an existing copy, regardless of overwrite policy.
    pub fn preserved(mut self) -> Self {
        self.preserved = true;
        self
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn is_minimal(&self) -> bool {
        self.minimal
    }

    pub fn is_removable(&self) -> bool {
        self.removable
    }

    pub fn is_preserved(&self) -> bool {
        self.preserved
    }

    /// Whether this file is in scope for the given install mode.
    pub fn in_mode(&self, mode: InstallMode) -> bool {
        match mode {
            InstallMode::Full => true,
            InstallMode::Minimal => self.minimal,
        }
    }
}

/// Immutable, validated set of files a scaffold mode installs.
///
/// ## Invariants (enforced by [`TemplateCatalog::new`])
///
/// 1. At least one file
/// 2. No duplicate relative paths
/// 3. The router file is one of the declared files
///
/// Ordering of `files` is the deterministic processing order used by the
/// planner and the health checks.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    files: Vec<TemplateFile>,
    router: RelativePath,
    cleanup_dirs: Vec<RelativePath>,
}

impl TemplateCatalog {
    /// Build and validate a catalog.
    pub fn new(
        files: Vec<TemplateFile>,
        router: RelativePath,
        cleanup_dirs: Vec<RelativePath>,
    ) -> Result<Self, DomainError> {
        if files.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for file in &files {
            if !seen.insert(file.path().as_str().to_string()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path().as_str().to_string(),
                });
            }
        }

        if !files.iter().any(|f| f.path() == &router) {
            return Err(DomainError::RouterNotInCatalog {
                path: router.as_str().to_string(),
            });
        }

        Ok(Self {
            files,
            router,
            cleanup_dirs,
        })
    }

    /// All files, in catalog (processing) order.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.iter()
    }

    /// Files in scope for a mode, in catalog order.
    pub fn files_for(&self, mode: InstallMode) -> impl Iterator<Item = &TemplateFile> {
        self.files.iter().filter(move |f| f.in_mode(mode))
    }

    /// Files the removal path may touch. Anything not listed here — and
    /// anything not in the catalog at all — is user content and untouchable.
    pub fn removable_files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.iter().filter(|f| f.is_removable())
    }

    /// Look up an entry by relative path.
    pub fn get(&self, path: &RelativePath) -> Option<&TemplateFile> {
        self.files.iter().find(|f| f.path() == path)
    }

    /// The short top-level file that points readers at deeper docs.
    /// Reference-integrity checking runs against this file.
    pub fn router(&self) -> &RelativePath {
        &self.router
    }

    /// Managed directories removed after `remove` when left empty,
    /// deepest first.
    pub fn cleanup_dirs(&self) -> &[RelativePath] {
        &self.cleanup_dirs
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
