//! Output management and formatting.
//!
//! The [`OutputManager`] owns every line the CLI writes to stdout: styled
//! human output, plain text for pipes, and JSON rendering of the core
//! result types.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use ctxinit_core::domain::{ActionOutcome, FileActionLog, HealthReport, Severity};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ──────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode — errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON, regardless of quiet mode — machine output is the
    /// whole point of asking for JSON.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    // ── Result rendering ──────────────────────────────────────────────────

    /// Render a scaffold/removal action log in the resolved format.
    pub fn action_log(&self, log: &FileActionLog) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(log);
        }

        for entry in log.entries() {
            let label = outcome_label(entry.outcome);
            let line = match &entry.detail {
                Some(detail) => format!("{label:<12} {}  ({detail})", entry.path),
                None => format!("{label:<12} {}", entry.path),
            };
            match entry.outcome {
                ActionOutcome::Failed => self.error(&line)?,
                ActionOutcome::Archived | ActionOutcome::Overwritten => self.warning(&line)?,
                _ => self.print(&format!("  {line}"))?,
            }
        }
        Ok(())
    }

    /// Render a health report in the resolved format.
    pub fn health_report(&self, report: &HealthReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(report);
        }

        for finding in &report.findings {
            let location = match finding.line {
                Some(line) => format!("{}:{line}", finding.file),
                None => finding.file.clone(),
            };
            let line = format!("{location}: {}", finding.message);
            match finding.severity {
                Severity::Error => self.error(&line)?,
                Severity::Warning => self.warning(&line)?,
            }
        }

        if !report.file_sizes.is_empty() {
            self.print("")?;
            self.header("Largest files")?;
            for size in report.top_offenders(3) {
                self.print(&format!("  {:>5} lines  {}", size.lines, size.file))?;
            }
        }

        self.print("")?;
        let errors = report.error_count();
        let warnings = report.warning_count();
        if errors == 0 && warnings == 0 {
            self.success("Tree is healthy")?;
        } else if errors == 0 {
            self.success(&format!("Tree is healthy ({warnings} warning(s))"))?;
        } else {
            self.error(&format!("{errors} error(s), {warnings} warning(s)"))?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

fn outcome_label(outcome: ActionOutcome) -> &'static str {
    match outcome {
        ActionOutcome::Kept => "kept",
        ActionOutcome::Created => "created",
        ActionOutcome::Overwritten => "overwritten",
        ActionOutcome::Archived => "archived",
        ActionOutcome::Removed => "removed",
        ActionOutcome::Failed => "failed",
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
