//! Scaffold engine - main application orchestrator.
//!
//! The engine coordinates a scaffold run end to end:
//! 1. Plan (pure, against an existence probe)
//! 2. Pre-flight containment check (no writes until every destination is
//!    proven to resolve inside the target root)
//! 3. Execute, isolating per-file failures
//!
//! It also owns the removal path and the per-file status listing.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::archive::ArchiveManager,
    },
    domain::{
        ActionOutcome, DomainError, FileActionLog, FileDecision, InstallMode, ManifestFacts,
        OverwritePolicy, RelativePath, ScaffoldPlan, TemplateCatalog, TreeProbe,
    },
    error::{CtxError, CtxResult},
};

/// Presence of one managed file, for the status listing.
#[derive(Debug, Clone)]
pub struct FileStatus {
    pub path: RelativePath,
    pub present: bool,
    pub minimal: bool,
    pub preserved: bool,
}

/// Existence probe over the real (or in-memory) tree.
///
/// Uses `lexists` so a dangling symlink at a destination counts as occupied;
/// the planner must not decide `Write` for a path something is squatting on.
struct FsProbe<'a> {
    fs: &'a dyn Filesystem,
    root: &'a Path,
}

impl TreeProbe for FsProbe<'_> {
    fn exists(&self, path: &RelativePath) -> bool {
        self.fs.lexists(&self.root.join(path))
    }
}

/// Main scaffolding engine.
pub struct ScaffoldEngine {
    catalog: TemplateCatalog,
    root: PathBuf,
    fs: Box<dyn Filesystem>,
    archiver: ArchiveManager,
}

impl ScaffoldEngine {
    /// Create an engine over the given target root.
    ///
    /// # Errors
    ///
    /// Fails with `TargetNotFound` when the root does not exist or is not a
    /// directory. The engine never creates the project directory itself.
    pub fn new(
        catalog: TemplateCatalog,
        root: impl Into<PathBuf>,
        fs: Box<dyn Filesystem>,
    ) -> CtxResult<Self> {
        let root = root.into();
        if !fs.is_dir(&root) {
            return Err(ApplicationError::TargetNotFound { path: root }.into());
        }
        Ok(Self {
            catalog,
            root,
            fs,
            archiver: ArchiveManager::new(),
        })
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the plan for an install run. Pure; touches nothing.
    pub fn plan(&self, mode: InstallMode, policy: OverwritePolicy) -> CtxResult<ScaffoldPlan> {
        let probe = FsProbe {
            fs: self.fs.as_ref(),
            root: &self.root,
        };
        Ok(ScaffoldPlan::build(&self.catalog, mode, policy, &probe)?)
    }

    /// Plan and execute an install run.
    #[instrument(skip_all, fields(root = %self.root.display(), ?mode, ?policy, dry_run))]
    pub fn install(
        &self,
        mode: InstallMode,
        policy: OverwritePolicy,
        facts: &ManifestFacts,
        dry_run: bool,
    ) -> CtxResult<FileActionLog> {
        let plan = self.plan(mode, policy)?;
        self.execute(&plan, facts, dry_run)
    }

    /// Execute a plan.
    ///
    /// The containment pre-flight runs before the first write; if any
    /// destination resolves outside the root (a symlinked ancestor, for
    /// example) the whole run aborts with nothing written. After that, each
    /// action's I/O failure is isolated into a `failed` log entry and the
    /// run continues.
    pub fn execute(
        &self,
        plan: &ScaffoldPlan,
        facts: &ManifestFacts,
        dry_run: bool,
    ) -> CtxResult<FileActionLog> {
        let paths: Vec<&RelativePath> = plan.actions().iter().map(|a| &a.path).collect();
        self.preflight(&paths)?;
        if plan
            .actions()
            .iter()
            .any(|a| a.decision == FileDecision::ArchiveThenWrite)
        {
            self.preflight_archive_dir()?;
        }

        let mut log = FileActionLog::new();
        for action in plan.actions() {
            match action.decision {
                FileDecision::Skip => {
                    log.record(action.path.clone(), ActionOutcome::Kept);
                }
                FileDecision::CreateDirectory => {
                    self.run_create_dir(&action.path, dry_run, &mut log);
                }
                FileDecision::Write => {
                    self.run_write(&action.path, facts, dry_run, &mut log)?;
                }
                FileDecision::ArchiveThenWrite => {
                    self.run_archive_write(&action.path, facts, dry_run, &mut log)?;
                }
            }
        }

        info!(
            created = log.count(ActionOutcome::Created),
            kept = log.count(ActionOutcome::Kept),
            overwritten = log.count(ActionOutcome::Overwritten),
            archived = log.count(ActionOutcome::Archived),
            failed = log.count(ActionOutcome::Failed),
            dry_run,
            "scaffold run finished"
        );
        Ok(log)
    }

    /// Remove managed files, either deleting them outright or relocating
    /// each into the archive directory.
    ///
    /// Only catalog files flagged removable are touched; anything else in
    /// the tree is user content. Managed directories left empty afterwards
    /// are cleaned up.
    #[instrument(skip_all, fields(root = %self.root.display(), archive, dry_run))]
    pub fn remove(&self, archive: bool, dry_run: bool) -> CtxResult<FileActionLog> {
        let targets: Vec<&RelativePath> = self
            .catalog
            .removable_files()
            .map(|f| f.path())
            .filter(|p| self.fs.lexists(&self.root.join(p)))
            .collect();
        self.preflight(&targets)?;
        if archive {
            self.preflight_archive_dir()?;
        }

        let mut log = FileActionLog::new();
        for path in targets {
            if dry_run {
                log.record_with_detail(path.clone(), ActionOutcome::Removed, "dry run");
                continue;
            }
            let result = if archive {
                self.archiver
                    .archive(self.fs.as_ref(), &self.root, path)
                    .map(|dest| format!("archived to {dest}"))
            } else {
                self.fs
                    .remove_file(&self.root.join(path))
                    .map(|()| String::from("deleted"))
            };
            match result {
                Ok(detail) => {
                    log.record_with_detail(path.clone(), ActionOutcome::Removed, detail);
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "removal failed");
                    log.record_with_detail(path.clone(), ActionOutcome::Failed, e.to_string());
                }
            }
        }

        if !dry_run {
            for dir in self.catalog.cleanup_dirs() {
                let abs = self.root.join(dir);
                if self.fs.is_dir(&abs) {
                    // Non-empty directories are left alone.
                    let _ = self.fs.remove_empty_dir(&abs);
                }
            }
        }

        info!(
            removed = log.count(ActionOutcome::Removed),
            failed = log.count(ActionOutcome::Failed),
            dry_run,
            "removal finished"
        );
        Ok(log)
    }

    /// Presence of every managed file, in catalog order.
    pub fn status(&self) -> Vec<FileStatus> {
        self.catalog
            .iter()
            .map(|f| FileStatus {
                path: f.path().clone(),
                present: self.fs.is_file(&self.root.join(f.path())),
                minimal: f.is_minimal(),
                preserved: f.is_preserved(),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Prove every destination resolves inside the root before any write.
    ///
    /// For each path, the deepest existing ancestor is canonicalised and
    /// must stay under the canonicalised root. This is what catches a
    /// symlinked `docs/` pointing at a directory outside the project.
    fn preflight(&self, paths: &[&RelativePath]) -> CtxResult<()> {
        let canonical_root = self.fs.canonicalize(&self.root)?;
        for path in paths {
            let ancestor = self.deepest_existing_ancestor(path);
            let resolved = self.fs.canonicalize(&ancestor)?;
            if !resolved.starts_with(&canonical_root) {
                return Err(DomainError::PathEscape {
                    path: path.as_str().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// The archive directory gets the same treatment as every other write
    /// destination: if something already sits at its path, it must resolve
    /// inside the root. Runs before the first write, so an escaping archive
    /// directory aborts with nothing moved or written.
    fn preflight_archive_dir(&self) -> CtxResult<()> {
        let dir = self.archiver.dir();
        let abs = self.root.join(dir);
        if !self.fs.lexists(&abs) {
            return Ok(());
        }
        let canonical_root = self.fs.canonicalize(&self.root)?;
        let resolved = self.fs.canonicalize(&abs)?;
        if !resolved.starts_with(&canonical_root) {
            return Err(DomainError::PathEscape {
                path: dir.as_str().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn deepest_existing_ancestor(&self, path: &RelativePath) -> PathBuf {
        let mut current = path.parent();
        while let Some(dir) = current {
            let abs = self.root.join(&dir);
            if self.fs.exists(&abs) {
                return abs;
            }
            current = dir.parent();
        }
        self.root.clone()
    }

    fn run_create_dir(&self, path: &RelativePath, dry_run: bool, log: &mut FileActionLog) {
        if dry_run {
            log.record_with_detail(path.clone(), ActionOutcome::Created, "directory, dry run");
            return;
        }
        match self.fs.create_dir_all(&self.root.join(path)) {
            Ok(()) => log.record_with_detail(path.clone(), ActionOutcome::Created, "directory"),
            Err(e) => {
                warn!(path = %path, error = %e, "directory creation failed");
                log.record_with_detail(path.clone(), ActionOutcome::Failed, e.to_string());
            }
        }
    }

    fn run_write(
        &self,
        path: &RelativePath,
        facts: &ManifestFacts,
        dry_run: bool,
        log: &mut FileActionLog,
    ) -> CtxResult<()> {
        let abs = self.root.join(path);
        if let Some(reason) = self.squatter(&abs) {
            log.record_with_detail(path.clone(), ActionOutcome::Failed, reason);
            return Ok(());
        }

        let existed = self.fs.lexists(&abs);
        let outcome = if existed {
            ActionOutcome::Overwritten
        } else {
            ActionOutcome::Created
        };

        if dry_run {
            log.record_with_detail(path.clone(), outcome, "dry run");
            return Ok(());
        }

        let content = self.rendered_content(path, facts)?;
        match self.fs.write_file(&abs, &content) {
            Ok(()) => log.record(path.clone(), outcome),
            Err(e) => {
                warn!(path = %path, error = %e, "write failed");
                log.record_with_detail(path.clone(), ActionOutcome::Failed, e.to_string());
            }
        }
        Ok(())
    }

    fn run_archive_write(
        &self,
        path: &RelativePath,
        facts: &ManifestFacts,
        dry_run: bool,
        log: &mut FileActionLog,
    ) -> CtxResult<()> {
        let abs = self.root.join(path);
        if let Some(reason) = self.squatter(&abs) {
            log.record_with_detail(path.clone(), ActionOutcome::Failed, reason);
            return Ok(());
        }

        if dry_run {
            log.record_with_detail(path.clone(), ActionOutcome::Archived, "dry run");
            return Ok(());
        }

        let dest = match self.archiver.archive(self.fs.as_ref(), &self.root, path) {
            Ok(dest) => dest,
            Err(e) => {
                warn!(path = %path, error = %e, "archive failed, file left in place");
                log.record_with_detail(path.clone(), ActionOutcome::Failed, e.to_string());
                return Ok(());
            }
        };

        let content = self.rendered_content(path, facts)?;
        match self.fs.write_file(&abs, &content) {
            Ok(()) => log.record_with_detail(
                path.clone(),
                ActionOutcome::Archived,
                format!("previous copy at {dest}"),
            ),
            Err(e) => {
                warn!(path = %path, error = %e, "write after archive failed");
                log.record_with_detail(path.clone(), ActionOutcome::Failed, e.to_string());
            }
        }
        Ok(())
    }

    /// A directory or symlink occupying a file destination. Never written
    /// through; the action fails and the run moves on.
    fn squatter(&self, abs: &Path) -> Option<&'static str> {
        if self.fs.is_symlink(abs) {
            Some("destination is a symlink")
        } else if self.fs.is_dir(abs) {
            Some("destination is a directory")
        } else {
            None
        }
    }

    fn rendered_content(&self, path: &RelativePath, facts: &ManifestFacts) -> CtxResult<String> {
        let file = self.catalog.get(path).ok_or_else(|| CtxError::Internal {
            message: format!("planned path not in catalog: {path}"),
        })?;
        Ok(facts.render(file.content()))
    }
}
