//! ctxinit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the ctxinit
//! agent-context scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          ctxinit-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldEngine, HealthValidator,      │
//! │   ArchiveManager)                       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Driven: Filesystem)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    ctxinit-adapters (Infrastructure)    │
//! │  (LocalFilesystem, MemoryFilesystem,    │
//! │   ManifestDetector, builtin catalog)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (TemplateCatalog, ScaffoldPlan,        │
//! │   HealthReport, RelativePath)           │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ctxinit_core::{
//!     application::ScaffoldEngine,
//!     domain::{InstallMode, ManifestFacts, OverwritePolicy},
//! };
//!
//! // catalog from ctxinit_adapters::builtin_catalog(), filesystem from
//! // ctxinit_adapters::filesystem::LocalFilesystem
//! let engine = ScaffoldEngine::new(catalog, "./my-project", filesystem).unwrap();
//! let log = engine
//!     .install(
//!         InstallMode::Full,
//!         OverwritePolicy::PreserveExisting,
//!         &ManifestFacts::new(),
//!         false,
//!     )
//!     .unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArchiveManager, FileStatus, HealthValidator, ScaffoldEngine, ports::Filesystem,
    };
    pub use crate::domain::{
        ActionOutcome, FactKey, FileActionLog, Finding, FindingKind, HealthReport, InstallMode,
        ManifestFacts, OverwritePolicy, RelativePath, ScaffoldPlan, Severity, TemplateCatalog,
        TemplateFile,
    };
    pub use crate::error::{CtxError, CtxResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
