// ============================================================================
// domain/mod.rs - DOMAIN LAYER
// ============================================================================
// Pure types and decisions. No I/O, no clocks, no dependencies on the
// application or adapter layers.

pub mod catalog;
pub mod common;
pub mod error;
pub mod facts;
pub mod plan;
pub mod report;

pub use catalog::{InstallMode, SENTINEL, TemplateCatalog, TemplateFile, TemplateSource};
pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use facts::{FactKey, ManifestFact, ManifestFacts};
pub use plan::{
    ActionOutcome, ActionRecord, FileAction, FileActionLog, FileDecision, OverwritePolicy,
    ScaffoldPlan, TreeProbe,
};
pub use report::{FileSize, Finding, FindingKind, HealthReport, Severity};
