//! Go facts from `go.mod`.

use std::path::Path;

use ctxinit_core::{
    application::ports::Filesystem,
    domain::{FactKey, ManifestFacts},
};

const SOURCE: &str = "go.mod";

pub(super) fn detect(_fs: &dyn Filesystem, _root: &Path, text: &str, facts: &mut ManifestFacts) {
    facts.resolve(FactKey::Language, "Go", SOURCE);

    // The `go 1.xx` directive, if present.
    let version = text
        .lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("go "))
        .map(|v| v.split_whitespace().next().unwrap_or(v));
    if let Some(version) = version {
        facts.resolve(FactKey::Runtime, format!("Go {version}"), SOURCE);
    }

    facts.resolve(FactKey::SetupCommand, "go mod download", SOURCE);
    facts.resolve(FactKey::BuildCommand, "go build ./...", SOURCE);
    facts.resolve(FactKey::TestCommand, "go test ./...", SOURCE);
    facts.resolve(FactKey::RunCommand, "go run .", SOURCE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use std::path::PathBuf;

    fn run(manifest: &str) -> ManifestFacts {
        let fs = MemoryFilesystem::new();
        let mut facts = ManifestFacts::new();
        detect(&fs, &PathBuf::from("/proj"), manifest, &mut facts);
        facts
    }

    #[test]
    fn version_directive_sets_runtime() {
        let facts = run("module example.com/demo\n\ngo 1.23\n");
        assert_eq!(facts.get(FactKey::Language), Some("Go"));
        assert_eq!(facts.get(FactKey::Runtime), Some("Go 1.23"));
        assert_eq!(facts.get(FactKey::BuildCommand), Some("go build ./..."));
    }

    #[test]
    fn missing_version_leaves_runtime_unresolved() {
        let facts = run("module example.com/demo\n");
        assert_eq!(facts.get(FactKey::Language), Some("Go"));
        assert_eq!(facts.get(FactKey::Runtime), None);
    }
}
