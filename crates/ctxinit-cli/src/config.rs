//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `--config <file>` (must exist when given)
//! 3. `.ctxinit.toml` in the current directory
//! 4. The global config file (platform config dir)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use ctxinit_core::application::{HARD_LINE_BUDGET, SOFT_LINE_BUDGET};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Line-budget thresholds for the health checks.
    pub budgets: BudgetConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Lines above which a managed file draws a warning.
    pub soft: usize,
    /// Lines above which a managed file is an error.
    pub hard: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            soft: SOFT_LINE_BUDGET,
            hard: HARD_LINE_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// The `config_file` parameter is the path the user passed via
    /// `--config`; when given, the file must exist and parse.  Without it,
    /// `.ctxinit.toml` in the current directory is used if present, then the
    /// global config file, then built-in defaults.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = config_file {
            return Self::read_file(path);
        }

        let local = PathBuf::from(".ctxinit.toml");
        if local.is_file() {
            return Self::read_file(&local);
        }

        let global = Self::config_path();
        if global.is_file() {
            return Self::read_file(&global);
        }

        Ok(Self::default())
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        if config.budgets.soft > config.budgets.hard {
            anyhow::bail!(
                "soft budget ({}) must not exceed hard budget ({})",
                config.budgets.soft,
                config.budgets.hard
            );
        }
        Ok(config)
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.ctxinit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ctxinit", "ctxinit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".ctxinit.toml"))
    }
}
