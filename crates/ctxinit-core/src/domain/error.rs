// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Containment violations (fatal — abort the whole run)
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path contains traversal or non-normal segments: {path}")]
    TraversalNotAllowed { path: String },

    #[error("Destination resolves outside the target root: {path}")]
    PathEscape { path: String },

    // ========================================================================
    // Catalog validation errors
    // ========================================================================
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Duplicate path in catalog: {path}")]
    DuplicatePath { path: String },

    #[error("Catalog has no files")]
    EmptyCatalog,

    #[error("Router file '{path}' is not declared by the catalog")]
    RouterNotInCatalog { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } | Self::TraversalNotAllowed { path } => vec![
                format!("The path '{}' cannot be contained in the project", path),
                "Catalog entries must be plain relative paths".into(),
            ],
            Self::PathEscape { path } => vec![
                format!("'{}' points outside the project directory", path),
                "A symlinked parent directory may be redirecting writes".into(),
                "No files were written during this run".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("The catalog declares '{}' more than once", path),
                "This is a bug in the built-in catalog; please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AbsolutePathNotAllowed { .. }
            | Self::TraversalNotAllowed { .. }
            | Self::PathEscape { .. } => ErrorCategory::Safety,
            Self::InvalidCatalog(_)
            | Self::DuplicatePath { .. }
            | Self::EmptyCatalog
            | Self::RouterNotInCatalog { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Safety,
    Internal,
}
