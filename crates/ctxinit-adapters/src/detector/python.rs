//! Python facts from `pyproject.toml`.

use std::path::Path;

use tracing::debug;

use ctxinit_core::{
    application::ports::Filesystem,
    domain::{FactKey, ManifestFacts},
};

const SOURCE: &str = "pyproject.toml";

pub(super) fn detect(_fs: &dyn Filesystem, _root: &Path, text: &str, facts: &mut ManifestFacts) {
    let data: toml::Table = match text.parse() {
        Ok(t) => t,
        Err(e) => {
            debug!(manifest = SOURCE, error = %e, "parse failed");
            return;
        }
    };

    facts.resolve(FactKey::Language, "Python", SOURCE);

    let requires = data
        .get("project")
        .and_then(|p| p.get("requires-python"))
        .and_then(|r| r.as_str());
    if let Some(requires) = requires {
        facts.resolve(FactKey::Runtime, format!("Python {requires}"), SOURCE);
    }

    // [tool.*] tables reveal the package manager.
    let tool = data.get("tool").and_then(|t| t.as_table());
    let has = |name: &str| tool.is_some_and(|t| t.contains_key(name));

    if has("poetry") {
        facts.resolve(FactKey::SetupCommand, "poetry install", SOURCE);
        facts.resolve(FactKey::RunCommand, "poetry run python", SOURCE);
    } else if has("uv") {
        facts.resolve(FactKey::SetupCommand, "uv sync", SOURCE);
        facts.resolve(FactKey::RunCommand, "uv run python", SOURCE);
    } else if has("pdm") {
        facts.resolve(FactKey::SetupCommand, "pdm install", SOURCE);
        facts.resolve(FactKey::RunCommand, "pdm run python", SOURCE);
    } else {
        facts.resolve(FactKey::SetupCommand, "pip install -e .", SOURCE);
    }
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
    fn poetry_project() {
        let facts = run("[tool.poetry]\nname = \"demo\"\n");
        assert_eq!(facts.get(FactKey::Language), Some("Python"));
        assert_eq!(facts.get(FactKey::SetupCommand), Some("poetry install"));
        assert_eq!(facts.get(FactKey::RunCommand), Some("poetry run python"));
    }

    #[test]
    fn uv_project_with_requires_python() {
        let facts = run("[project]\nname = \"demo\"\nrequires-python = \">=3.12\"\n\n[tool.uv]\n");
        assert_eq!(facts.get(FactKey::Runtime), Some("Python >=3.12"));
        assert_eq!(facts.get(FactKey::SetupCommand), Some("uv sync"));
    }

    #[test]
    fn plain_pip_fallback_has_no_run_command() {
        let facts = run("[project]\nname = \"demo\"\n");
        assert_eq!(facts.get(FactKey::SetupCommand), Some("pip install -e ."));
        assert_eq!(facts.get(FactKey::RunCommand), None);
    }
}
