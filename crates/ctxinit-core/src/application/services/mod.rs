//! Application services - use case orchestration.

pub mod archive;
pub mod health_validator;
pub mod scaffold_engine;

pub use archive::{ARCHIVE_DIR, ArchiveManager};
pub use health_validator::{HARD_LINE_BUDGET, HealthValidator, SOFT_LINE_BUDGET};
pub use scaffold_engine::{FileStatus, ScaffoldEngine};
