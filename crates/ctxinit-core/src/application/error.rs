//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The target project directory does not exist or is not a directory.
    #[error("Target directory not found: {path}")]
    TargetNotFound { path: PathBuf },

    /// Archiving an existing file failed.
    #[error("Could not archive {path}: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    /// Manifest parsing failed in a way the detector could not skip over.
    #[error("Manifest detection failed for {manifest}: {reason}")]
    DetectionFailed { manifest: String, reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::TargetNotFound { path } => vec![
                format!("No directory at: {}", path.display()),
                "Create the project directory first, or run from inside it".into(),
            ],
            Self::ArchiveFailed { path, .. } => vec![
                format!("Could not move {} into the archive", path.display()),
                "Check write permissions on the archive directory".into(),
            ],
            Self::DetectionFailed { manifest, .. } => vec![
                format!("The manifest '{}' could not be read", manifest),
                "Detection is optional; rerun without --detect to skip it".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::ArchiveFailed { .. } => ErrorCategory::Internal,
            Self::TargetNotFound { .. } => ErrorCategory::NotFound,
            Self::DetectionFailed { .. } => ErrorCategory::Configuration,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
