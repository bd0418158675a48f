//! Infrastructure adapters for ctxinit.
//!
//! This crate implements the ports defined in
//! `ctxinit-core::application::ports` and owns everything that touches the
//! outside world: the real filesystem, manifest parsing, and the built-in
//! template catalog.

pub mod builtin_catalog;
pub mod detector;
pub mod filesystem;

// Re-export commonly used adapters
pub use builtin_catalog::builtin_catalog;
pub use detector::ManifestDetector;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
