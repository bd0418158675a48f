//! Pure scaffold planning and the action log it executes into.
//!
//! Planning is separated from execution so the hardest-to-test decisions
//! (overwrite policy, the preserved-file exclusion, directory ordering) run
//! against a [`TreeProbe`] — a simulated tree in tests, the real filesystem
//! in production — without any I/O of their own. The engine in the
//! application layer is the only code that turns a plan into writes.

use std::collections::HashSet;

use serde::Serialize;

use super::{
    DomainError,
    catalog::{InstallMode, TemplateCatalog},
    common::RelativePath,
};

/// What to do when a catalog file already exists at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverwritePolicy {
    /// Leave existing files untouched (default; idempotent).
    PreserveExisting,
    /// Overwrite in place.
    Force,
    /// Move the existing file into the archive, then write.
    ForceWithArchive,
}

/// Per-entry decision in a scaffold plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileDecision {
    /// Destination exists and policy (or the preserved flag) says keep it.
    Skip,
    /// Write rendered content (create or overwrite).
    Write,
    /// Archive the existing file, then write.
    ArchiveThenWrite,
    /// Create a missing parent directory.
    CreateDirectory,
}

/// One planned action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAction {
    pub path: RelativePath,
    pub decision: FileDecision,
}

/// Existence probe the planner runs against.
///
/// Implemented over the real filesystem by the engine and over a plain set
/// of paths in tests.
pub trait TreeProbe {
    /// Whether anything (file, dir, symlink) occupies this relative path.
    fn exists(&self, path: &RelativePath) -> bool;
}

impl TreeProbe for HashSet<RelativePath> {
    fn exists(&self, path: &RelativePath) -> bool {
        self.contains(path)
    }
}

/// Ordered, purely-computed list of actions for one scaffold run.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldPlan {
    pub mode: InstallMode,
    pub policy: OverwritePolicy,
    actions: Vec<FileAction>,
}

// InstallMode is not serialized with any wire guarantees; derive-by-name.
impl Serialize for InstallMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Full => serializer.serialize_str("full"),
            Self::Minimal => serializer.serialize_str("minimal"),
        }
    }
}

impl ScaffoldPlan {
    /// Build a plan for installing `mode` under `policy`.
    ///
    /// Decision table, per catalog entry in catalog order:
    ///
    /// | Exists | Preserved | Policy             | Decision           |
    /// |--------|-----------|--------------------|--------------------|
    /// | no     | —         | any                | Write              |
    /// | yes    | yes       | any                | Skip               |
    /// | yes    | no        | PreserveExisting   | Skip               |
    /// | yes    | no        | Force              | Write              |
    /// | yes    | no        | ForceWithArchive   | ArchiveThenWrite   |
    ///
    /// Missing parent directories get explicit `CreateDirectory` actions,
    /// each emitted once, before the first file that needs them.
    ///
    /// # Errors
    ///
    /// Catalog paths are containment-checked at catalog construction, so
    /// planning itself cannot produce an escaping action; this returns an
    /// error only if the catalog and mode select nothing (an empty run is
    /// a caller bug, not a no-op).
    pub fn build(
        catalog: &TemplateCatalog,
        mode: InstallMode,
        policy: OverwritePolicy,
        probe: &dyn TreeProbe,
    ) -> Result<Self, DomainError> {
        let mut actions = Vec::new();
        let mut planned_dirs: HashSet<RelativePath> = HashSet::new();

        for file in catalog.files_for(mode) {
            let path = file.path().clone();

            // Parent directories first, shallowest to deepest.
            let mut chain = Vec::new();
            let mut parent = path.parent();
            while let Some(dir) = parent {
                if planned_dirs.contains(&dir) || probe.exists(&dir) {
                    break;
                }
                parent = dir.parent();
                chain.push(dir);
            }
            for dir in chain.into_iter().rev() {
                planned_dirs.insert(dir.clone());
                actions.push(FileAction {
                    path: dir,
                    decision: FileDecision::CreateDirectory,
                });
            }

            let decision = if !probe.exists(&path) {
                FileDecision::Write
            } else if file.is_preserved() {
                FileDecision::Skip
            } else {
                match policy {
                    OverwritePolicy::PreserveExisting => FileDecision::Skip,
                    OverwritePolicy::Force => FileDecision::Write,
                    OverwritePolicy::ForceWithArchive => FileDecision::ArchiveThenWrite,
                }
            };

            actions.push(FileAction { path, decision });
        }

        if actions.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        Ok(Self {
            mode,
            policy,
            actions,
        })
    }

    pub fn actions(&self) -> &[FileAction] {
        &self.actions
    }

    /// True when executing this plan would change nothing on disk.
    pub fn is_noop(&self) -> bool {
        self.actions.iter().all(|a| a.decision == FileDecision::Skip)
    }
}

// ── action log ────────────────────────────────────────────────────────────────

/// Outcome of one executed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOutcome {
    /// Existing file left untouched.
    Kept,
    /// File (or directory) newly written.
    Created,
    /// Existing file replaced in place.
    Overwritten,
    /// Existing file moved to the archive before the new write.
    Archived,
    /// Managed file deleted or moved out by the removal path.
    Removed,
    /// The action failed; `detail` carries the reason. Isolated — the run
    /// continues with remaining files.
    Failed,
}

/// One entry in the observable result of a scaffold or removal run.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    pub path: RelativePath,
    pub outcome: ActionOutcome,
    /// Archive destination, failure reason, or similar context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered record of what a run actually did, per file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FileActionLog {
    entries: Vec<ActionRecord>,
}

impl FileActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: RelativePath, outcome: ActionOutcome) {
        self.entries.push(ActionRecord {
            path,
            outcome,
            detail: None,
        });
    }

    pub fn record_with_detail(
        &mut self,
        path: RelativePath,
        outcome: ActionOutcome,
        detail: impl Into<String>,
    ) {
        self.entries.push(ActionRecord {
            path,
            outcome,
            detail: Some(detail.into()),
        });
    }

    pub fn entries(&self) -> &[ActionRecord] {
        &self.entries
    }

    pub fn count(&self, outcome: ActionOutcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    /// At least one per-file failure was isolated during the run.
    pub fn has_failures(&self) -> bool {
        self.count(ActionOutcome::Failed) > 0
    }

    /// Every entry is `kept` — the signature of an idempotent re-run.
    pub fn is_all_kept(&self) -> bool {
        !self.entries.is_empty()
            && self.entries.iter().all(|e| e.outcome == ActionOutcome::Kept)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
