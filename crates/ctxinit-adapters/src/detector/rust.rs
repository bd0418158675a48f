//! Rust facts from `Cargo.toml`.

use std::path::Path;

use tracing::debug;

use ctxinit_core::{
    application::ports::Filesystem,
    domain::{FactKey, ManifestFacts},
};

const SOURCE: &str = "Cargo.toml";

pub(super) fn detect(_fs: &dyn Filesystem, _root: &Path, text: &str, facts: &mut ManifestFacts) {
    let data: toml::Table = match text.parse() {
        Ok(t) => t,
        Err(e) => {
            debug!(manifest = SOURCE, error = %e, "parse failed");
            return;
        }
    };

    let edition = data
        .get("package")
        .and_then(|p| p.get("edition"))
        .and_then(|e| e.as_str());
    let language = match edition {
        Some(edition) => format!("Rust ({edition})"),
        None => "Rust".to_string(),
    };
    facts.resolve(FactKey::Language, language, SOURCE);

    facts.resolve(FactKey::SetupCommand, "cargo fetch", SOURCE);
    facts.resolve(FactKey::BuildCommand, "cargo build", SOURCE);
    facts.resolve(FactKey::TestCommand, "cargo test", SOURCE);
    facts.resolve(FactKey::LintCommand, "cargo fmt && cargo clippy", SOURCE);
    facts.resolve(FactKey::RunCommand, "cargo run", SOURCE);
}
