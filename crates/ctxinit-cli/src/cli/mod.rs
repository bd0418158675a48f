//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "ctxinit",
    bin_name = "ctxinit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4da} Scaffold and lint agent context files",
    long_about = "ctxinit scaffolds a standardized set of agent-context \
                  documentation files (AGENTS.md, CLAUDE.md, docs/*) into a \
                  project and validates the health of the resulting tree.",
    after_help = "EXAMPLES:\n\
        \x20 ctxinit init --detect\n\
        \x20 ctxinit new my-service --dir ~/work\n\
        \x20 ctxinit status --check\n\
        \x20 ctxinit completions bash > /usr/share/bash-completion/completions/ctxinit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold context files into the current directory.
    #[command(
        visible_alias = "i",
        about = "Scaffold context files into the current directory",
        after_help = "EXAMPLES:\n\
            \x20 ctxinit init                   # preserve anything that exists\n\
            \x20 ctxinit init --detect          # fill facts from manifests\n\
            \x20 ctxinit init --force-archive   # overwrite, archiving old copies\n\
            \x20 ctxinit init --minimal --dry-run"
    )]
    Init(InitArgs),

    /// Create a new directory and scaffold into it.
    #[command(
        visible_alias = "n",
        about = "Create a directory and scaffold context files into it",
        after_help = "EXAMPLES:\n\
            \x20 ctxinit new my-service\n\
            \x20 ctxinit new my-service --dir ~/work --detect"
    )]
    New(NewArgs),

    /// Remove managed context files.
    #[command(
        visible_alias = "rm",
        about = "Remove managed context files",
        after_help = "EXAMPLES:\n\
            \x20 ctxinit remove --dry-run\n\
            \x20 ctxinit remove --archive --yes"
    )]
    Remove(RemoveArgs),

    /// Check the health of an existing context tree.
    #[command(
        visible_alias = "st",
        about = "Report on context tree health",
        after_help = "EXAMPLES:\n\
            \x20 ctxinit status\n\
            \x20 ctxinit status --check          # exit non-zero on errors\n\
            \x20 ctxinit status --output-format json"
    )]
    Status(StatusArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ctxinit completions bash > ~/.local/share/bash-completion/completions/ctxinit\n\
            \x20 ctxinit completions zsh  > ~/.zfunc/_ctxinit\n\
            \x20 ctxinit completions fish > ~/.config/fish/completions/ctxinit.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared scaffold flags ─────────────────────────────────────────────────────

/// Flags shared by `init` and `new`.
#[derive(Debug, Args)]
pub struct ScaffoldFlags {
    /// Overwrite existing managed files in place (destructive).
    #[arg(
        long = "force",
        conflicts_with = "force_archive",
        help = "Overwrite existing managed files"
    )]
    pub force: bool,

    /// Overwrite existing managed files, archiving the old copies first.
    #[arg(
        long = "force-archive",
        help = "Overwrite existing managed files, archiving old copies"
    )]
    pub force_archive: bool,

    /// Install only the minimal file set.
    #[arg(long = "minimal", help = "Install only the minimal file set")]
    pub minimal: bool,

    /// Fill placeholders from recognised project manifests.
    #[arg(
        long = "detect",
        help = "Detect facts from project manifests (package.json, Cargo.toml, ...)"
    )]
    pub detect: bool,

    /// Preview what would be written without writing any files.
    #[arg(long = "dry-run", help = "Show planned actions without writing")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `ctxinit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub scaffold: ScaffoldFlags,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `ctxinit new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the directory to create.
    #[arg(value_name = "NAME", help = "Name of the project directory to create")]
    pub name: String,

    /// Parent directory to create the project under.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "PARENT",
        help = "Parent directory (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub scaffold: ScaffoldFlags,
}

// ── remove ────────────────────────────────────────────────────────────────────

/// Arguments for `ctxinit remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Archive files instead of deleting them.
    #[arg(long = "archive", help = "Move files to the archive instead of deleting")]
    pub archive: bool,

    /// Preview what would be removed without touching anything.
    #[arg(long = "dry-run", help = "Show what would be removed without removing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and remove immediately")]
    pub yes: bool,
}

// ── status ────────────────────────────────────────────────────────────────────

/// Arguments for `ctxinit status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Fail (non-zero exit) when any error-severity finding exists.
    #[arg(long = "check", help = "Exit non-zero when the tree has errors")]
    pub check: bool,

    /// Check against the minimal file set only.
    #[arg(long = "minimal", help = "Check the minimal file set only")]
    pub minimal: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `ctxinit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_init_with_flags() {
        let cli = Cli::parse_from(["ctxinit", "init", "--minimal", "--detect", "--dry-run"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert!(args.scaffold.minimal);
        assert!(args.scaffold.detect);
        assert!(args.scaffold.dry_run);
        assert!(!args.scaffold.force);
    }

    #[test]
    fn parse_new_with_parent_dir() {
        let cli = Cli::parse_from(["ctxinit", "new", "my-service", "--dir", "/tmp/work"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "my-service");
        assert_eq!(args.dir.as_deref(), Some(std::path::Path::new("/tmp/work")));
    }

    #[test]
    fn force_and_force_archive_conflict() {
        let result = Cli::try_parse_from(["ctxinit", "init", "--force", "--force-archive"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["ctxinit", "--quiet", "--verbose", "status"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_remove_flags() {
        let cli = Cli::parse_from(["ctxinit", "remove", "--archive", "--yes"]);
        let Commands::Remove(args) = cli.command else {
            panic!("expected Remove command");
        };
        assert!(args.archive);
        assert!(args.yes);
        assert!(!args.dry_run);
    }

    #[test]
    fn parse_status_check() {
        let cli = Cli::parse_from(["ctxinit", "status", "--check", "--minimal"]);
        let Commands::Status(args) = cli.command else {
            panic!("expected Status command");
        };
        assert!(args.check);
        assert!(args.minimal);
    }

    #[test]
    fn output_format_defaults_to_auto() {
        let cli = Cli::parse_from(["ctxinit", "status"]);
        assert_eq!(cli.global.output_format, OutputFormat::Auto);
    }
}
