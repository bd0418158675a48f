//! `ctxinit new` — create a project directory and scaffold into it.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::{
    cli::{GlobalArgs, NewArgs},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `ctxinit new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name
/// 2. Resolve the target path under `--dir` (default: current directory)
/// 3. Create the directory
/// 4. Delegate to the shared scaffold runner
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    validate_project_name(&args.name)?;

    let parent = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let project_path = parent.join(&args.name);

    if project_path.exists() {
        return Err(CliError::DirectoryExists { path: project_path });
    }

    // A dry run never creates the directory, and with no directory there is
    // nothing to plan against; describe and stop.
    if args.scaffold.dry_run {
        output.info(&format!(
            "Dry run: would create '{}' and scaffold into it",
            project_path.display()
        ))?;
        return Ok(());
    }

    std::fs::create_dir_all(&project_path)
        .with_cli_context(|| format!("failed to create directory '{}'", project_path.display()))?;
    info!(path = %project_path.display(), "project directory created");

    super::init::scaffold_into(&project_path, &args.scaffold, &output)?;

    if !output.is_quiet() {
        output.print("")?;
        output.print(&format!("  cd {}", project_path.display()))?;
    }
    Ok(())
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name == "." || name == ".." {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be '.' or '..'".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
