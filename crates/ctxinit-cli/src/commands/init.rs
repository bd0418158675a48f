//! `ctxinit init` — scaffold context files into the current directory.
//!
//! Responsibility: translate CLI flags into an engine run and display the
//! result.  No business logic lives here; `new` reuses [`scaffold_into`]
//! after creating its target directory.

use std::path::Path;

use tracing::{debug, instrument};

use ctxinit_adapters::{LocalFilesystem, ManifestDetector, builtin_catalog};
use ctxinit_core::{
    application::ScaffoldEngine,
    domain::{InstallMode, ManifestFacts, OverwritePolicy},
};

use crate::{
    cli::{GlobalArgs, InitArgs, ScaffoldFlags},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `ctxinit init` command.
#[instrument(skip_all)]
pub fn execute(args: InitArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let root = std::env::current_dir()
        .with_cli_context(|| "failed to resolve the current directory")?;
    scaffold_into(&root, &args.scaffold, &output)
}

/// Run one scaffold pass over `root`.  Shared by `init` and `new`.
pub(super) fn scaffold_into(
    root: &Path,
    flags: &ScaffoldFlags,
    output: &OutputManager,
) -> CliResult<()> {
    let policy = overwrite_policy(flags);
    let mode = install_mode(flags);
    let fs = LocalFilesystem::new();

    let facts = if flags.detect {
        let facts = ManifestDetector::new().detect(&fs, root);
        debug!(resolved = facts.len(), "manifest detection finished");
        for fact in facts.iter() {
            output.info(&format!(
                "detected {} = {}  (from {})",
                fact.key, fact.value, fact.source
            ))?;
        }
        facts
    } else {
        ManifestFacts::new()
    };

    let engine = ScaffoldEngine::new(builtin_catalog()?, root, Box::new(fs))?;

    output.header(&format!("Scaffolding into {}", root.display()))?;
    let log = engine.install(mode, policy, &facts, flags.dry_run)?;
    output.action_log(&log)?;

    if flags.dry_run {
        output.info("Dry run — nothing was written")?;
        return Ok(());
    }

    if log.has_failures() {
        output.warning(&format!(
            "Completed with {} failure(s); see the log above",
            log.count(ctxinit_core::domain::ActionOutcome::Failed)
        ))?;
    } else if log.is_all_kept() {
        output.success("Already scaffolded — every file kept as-is")?;
    } else {
        output.success("Context files ready")?;
        output.print("")?;
        output.print("Next steps:")?;
        output.print("  Fill docs/PROJECT.md and docs/CONVENTIONS.md")?;
        output.print("  Run 'ctxinit status' to check tree health")?;
    }

    Ok(())
}

fn overwrite_policy(flags: &ScaffoldFlags) -> OverwritePolicy {
    if flags.force_archive {
        OverwritePolicy::ForceWithArchive
    } else if flags.force {
        OverwritePolicy::Force
    } else {
        OverwritePolicy::PreserveExisting
    }
}

fn install_mode(flags: &ScaffoldFlags) -> InstallMode {
    if flags.minimal {
        InstallMode::Minimal
    } else {
        InstallMode::Full
    }
}
