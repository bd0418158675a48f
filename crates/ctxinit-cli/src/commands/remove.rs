//! `ctxinit remove` — remove managed context files from the current tree.

use tracing::instrument;

use ctxinit_adapters::{LocalFilesystem, builtin_catalog};
use ctxinit_core::application::ScaffoldEngine;

use crate::{
    cli::{GlobalArgs, RemoveArgs},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `ctxinit remove` command.
///
/// Only catalog-declared removable files are touched; `.gitignore` and all
/// user content survive.  Deletes outright unless `--archive` is given.
#[instrument(skip_all, fields(archive = args.archive, dry_run = args.dry_run))]
pub fn execute(args: RemoveArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let root = std::env::current_dir()
        .with_cli_context(|| "failed to resolve the current directory")?;

    let engine = ScaffoldEngine::new(builtin_catalog()?, &root, Box::new(LocalFilesystem::new()))?;

    let present = engine.status().iter().filter(|s| s.present).count();
    if present == 0 {
        output.info("No managed context files found — nothing to remove")?;
        return Ok(());
    }

    if !args.dry_run && !args.yes && !global.quiet {
        let verb = if args.archive { "Archive" } else { "Delete" };
        if !confirm(&format!("{verb} up to {present} managed file(s)?"))? {
            return Err(CliError::Cancelled);
        }
    }

    let log = engine.remove(args.archive, args.dry_run)?;
    output.action_log(&log)?;

    if args.dry_run {
        output.info("Dry run — nothing was removed")?;
    } else if log.has_failures() {
        output.warning("Some files could not be removed; see the log above")?;
    } else {
        output.success("Managed context files removed")?;
    }
    Ok(())
}

/// Destructive-action prompt; defaults to *no*.
fn confirm(question: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{question} [y/N] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}
