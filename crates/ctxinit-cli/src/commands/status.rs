//! `ctxinit status` — report on the health of an existing context tree.

use tracing::instrument;

use ctxinit_adapters::{LocalFilesystem, builtin_catalog};
use ctxinit_core::{
    application::HealthValidator,
    domain::InstallMode,
};

use crate::{
    cli::{GlobalArgs, StatusArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `ctxinit status` command.
///
/// Without `--check` the report is informational and the command always
/// succeeds.  With `--check`, error-severity findings fail the run.
#[instrument(skip_all, fields(check = args.check, minimal = args.minimal))]
pub fn execute(
    args: StatusArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = std::env::current_dir()
        .with_cli_context(|| "failed to resolve the current directory")?;

    let mode = if args.minimal {
        InstallMode::Minimal
    } else {
        InstallMode::Full
    };

    let validator =
        HealthValidator::with_budgets(builtin_catalog()?, config.budgets.soft, config.budgets.hard);
    let report = validator.check(&LocalFilesystem::new(), &root, mode)?;

    output.health_report(&report)?;

    if args.check && !report.passes_strict() {
        return Err(CliError::ChecksFailed {
            errors: report.error_count(),
        });
    }
    Ok(())
}
