//! Manifest detection - derive project facts from well-known manifests.
//!
//! The detector scans a fixed, ordered table of manifest filenames. Each
//! recognised manifest contributes facts through first-writer-wins
//! resolution, so the table order is the precedence order. A manifest that
//! fails to parse is dropped with a debug event and detection continues;
//! a project with no recognised manifests simply yields no facts.

use std::path::Path;

use tracing::{debug, instrument};

use ctxinit_core::{application::ports::Filesystem, domain::ManifestFacts};

mod go;
mod node;
mod python;
mod rust;

/// Parses one manifest's text into facts. Receives the filesystem so a
/// parser can probe sibling files (lockfiles, for instance).
type SourceFn = fn(&dyn Filesystem, &Path, &str, &mut ManifestFacts);

/// Recognised manifests, in precedence order.
const SOURCES: &[(&str, SourceFn)] = &[
    ("package.json", node::detect),
    ("Cargo.toml", rust::detect),
    ("go.mod", go::detect),
    ("pyproject.toml", python::detect),
];

/// Read-only fact detection over a project root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestDetector;

impl ManifestDetector {
    pub fn new() -> Self {
        Self
    }

    /// Scan the root for recognised manifests and resolve facts.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn detect(&self, fs: &dyn Filesystem, root: &Path) -> ManifestFacts {
        let mut facts = ManifestFacts::new();
        for (manifest, parse) in SOURCES {
            let path = root.join(manifest);
            if !fs.is_file(&path) {
                continue;
            }
            match fs.read_to_string(&path) {
                Ok(text) => {
                    parse(fs, root, &text, &mut facts);
                    debug!(manifest, resolved = facts.len(), "manifest scanned");
                }
                Err(e) => {
                    debug!(manifest, error = %e, "manifest unreadable, skipped");
                }
            }
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use ctxinit_core::domain::FactKey;

    fn project(files: &[(&str, &str)]) -> (MemoryFilesystem, std::path::PathBuf) {
        let fs = MemoryFilesystem::new();
        let root = std::path::PathBuf::from("/proj");
        fs.create_dir_all(&root).unwrap();
        for (name, content) in files {
            fs.write_file(&root.join(name), content).unwrap();
        }
        (fs, root)
    }

    #[test]
    fn empty_project_yields_no_facts() {
        let (fs, root) = project(&[]);
        let facts = ManifestDetector::new().detect(&fs, &root);
        assert!(facts.is_empty());
    }

    #[test]
    fn unparsable_manifest_is_skipped_not_fatal() {
        let (fs, root) = project(&[
            ("package.json", "{ not json"),
            ("Cargo.toml", "[package]\nname = \"demo\"\nedition = \"2024\"\n"),
        ]);
        let facts = ManifestDetector::new().detect(&fs, &root);
        assert_eq!(facts.get(FactKey::Language), Some("Rust (2024)"));
    }

    #[test]
    fn earlier_source_wins_over_later() {
        // package.json resolves Setup first; Cargo.toml must not override it.
        let (fs, root) = project(&[
            ("package.json", r#"{"scripts": {}}"#),
            ("Cargo.toml", "[package]\nname = \"demo\"\n"),
        ]);
        let facts = ManifestDetector::new().detect(&fs, &root);
        assert_eq!(facts.get(FactKey::SetupCommand), Some("npm install"));
        assert_eq!(facts.source_of(FactKey::SetupCommand), Some("package.json"));
        // Rust still contributes what Node left unresolved.
        assert_eq!(facts.get(FactKey::Language), Some("Rust"));
    }
}
