//! Node facts from `package.json`.

use std::path::Path;

use tracing::debug;

use ctxinit_core::{
    application::ports::Filesystem,
    domain::{FactKey, ManifestFacts},
};

const SOURCE: &str = "package.json";

pub(super) fn detect(fs: &dyn Filesystem, root: &Path, text: &str, facts: &mut ManifestFacts) {
    let data: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            debug!(manifest = SOURCE, error = %e, "parse failed");
            return;
        }
    };

    facts.resolve(FactKey::Runtime, "Node.js", SOURCE);

    let manager = package_manager(&data, fs, root);
    // yarn and bun run scripts without the `run` keyword.
    let run_prefix = if manager == "yarn" || manager == "bun" {
        format!("{manager} ")
    } else {
        format!("{manager} run ")
    };

    let empty = serde_json::Map::new();
    let scripts = data
        .get("scripts")
        .and_then(|v| v.as_object())
        .unwrap_or(&empty);

    if scripts.contains_key("setup") {
        facts.resolve(FactKey::SetupCommand, format!("{run_prefix}setup"), SOURCE);
    } else {
        facts.resolve(FactKey::SetupCommand, format!("{manager} install"), SOURCE);
    }
    if scripts.contains_key("build") {
        facts.resolve(FactKey::BuildCommand, format!("{run_prefix}build"), SOURCE);
    }
    if scripts.contains_key("test") {
        facts.resolve(FactKey::TestCommand, format!("{run_prefix}test"), SOURCE);
    }
    if scripts.contains_key("lint") {
        facts.resolve(FactKey::LintCommand, format!("{run_prefix}lint"), SOURCE);
    } else if scripts.contains_key("format") {
        facts.resolve(FactKey::LintCommand, format!("{run_prefix}format"), SOURCE);
    }
    if scripts.contains_key("dev") {
        facts.resolve(FactKey::RunCommand, format!("{run_prefix}dev"), SOURCE);
    } else if scripts.contains_key("start") {
        facts.resolve(FactKey::RunCommand, format!("{run_prefix}start"), SOURCE);
    }
}

/// `packageManager` field first, then lockfiles, then npm.
fn package_manager(data: &serde_json::Value, fs: &dyn Filesystem, root: &Path) -> &'static str {
    let pm = data
        .get("packageManager")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if pm.contains("pnpm") {
        "pnpm"
    } else if pm.contains("yarn") {
        "yarn"
    } else if pm.contains("bun") {
        "bun"
    } else if fs.is_file(&root.join("pnpm-lock.yaml")) {
        "pnpm"
    } else if fs.is_file(&root.join("yarn.lock")) {
        "yarn"
    } else if fs.is_file(&root.join("bun.lockb")) {
        "bun"
    } else {
        "npm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use std::path::PathBuf;

    fn run(manifest: &str, extra_files: &[&str]) -> ManifestFacts {
        let fs = MemoryFilesystem::new();
        let root = PathBuf::from("/proj");
        fs.create_dir_all(&root).unwrap();
        for name in extra_files {
            fs.write_file(&root.join(name), "").unwrap();
        }
        let mut facts = ManifestFacts::new();
        detect(&fs, &root, manifest, &mut facts);
        facts
    }

    #[test]
    fn scripts_map_to_commands() {
        let facts = run(
            r#"{"scripts": {"build": "tsc", "test": "vitest", "lint": "eslint .", "dev": "vite"}}"#,
            &[],
        );
        assert_eq!(facts.get(FactKey::Runtime), Some("Node.js"));
        assert_eq!(facts.get(FactKey::SetupCommand), Some("npm install"));
        assert_eq!(facts.get(FactKey::BuildCommand), Some("npm run build"));
        assert_eq!(facts.get(FactKey::TestCommand), Some("npm run test"));
        assert_eq!(facts.get(FactKey::LintCommand), Some("npm run lint"));
        assert_eq!(facts.get(FactKey::RunCommand), Some("npm run dev"));
    }

    #[test]
    fn package_manager_field_beats_lockfile() {
        let facts = run(
            r#"{"packageManager": "pnpm@9.0.0", "scripts": {"build": "x"}}"#,
            &["yarn.lock"],
        );
        assert_eq!(facts.get(FactKey::BuildCommand), Some("pnpm run build"));
    }

    #[test]
    fn yarn_drops_the_run_keyword() {
        let facts = run(r#"{"scripts": {"test": "jest"}}"#, &["yarn.lock"]);
        assert_eq!(facts.get(FactKey::TestCommand), Some("yarn test"));
        assert_eq!(facts.get(FactKey::SetupCommand), Some("yarn install"));
    }

    #[test]
    fn format_and_start_are_fallbacks() {
        let facts = run(r#"{"scripts": {"format": "prettier -w .", "start": "node ."}}"#, &[]);
        assert_eq!(facts.get(FactKey::LintCommand), Some("npm run format"));
        assert_eq!(facts.get(FactKey::RunCommand), Some("npm run start"));
    }

    #[test]
    fn setup_script_overrides_install() {
        let facts = run(r#"{"scripts": {"setup": "./bootstrap.sh"}}"#, &[]);
        assert_eq!(facts.get(FactKey::SetupCommand), Some("npm run setup"));
    }
}
