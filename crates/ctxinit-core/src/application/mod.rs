//! Application layer.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ScaffoldEngine, HealthValidator,
//!   ArchiveManager)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ARCHIVE_DIR, ArchiveManager, FileStatus, HARD_LINE_BUDGET, HealthValidator, SOFT_LINE_BUDGET,
    ScaffoldEngine,
};

pub use ports::Filesystem;

pub use error::ApplicationError;
