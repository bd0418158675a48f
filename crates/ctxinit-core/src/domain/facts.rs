//! Facts detected from project manifests, and placeholder rendering.
//!
//! A [`ManifestFacts`] value is produced fresh per run by the manifest
//! detector (adapters crate) and consumed by the scaffold engine when
//! rendering templates. Resolution is first-writer-wins: the detector scans
//! manifest sources in a fixed precedence order, and once a fact is resolved
//! a later source can never override it.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::catalog::SENTINEL;

/// The fixed set of facts templates can reference as `{{KEY}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKey {
    Language,
    Runtime,
    SetupCommand,
    BuildCommand,
    TestCommand,
    LintCommand,
    RunCommand,
}

impl FactKey {
    pub const ALL: [FactKey; 7] = [
        FactKey::Language,
        FactKey::Runtime,
        FactKey::SetupCommand,
        FactKey::BuildCommand,
        FactKey::TestCommand,
        FactKey::LintCommand,
        FactKey::RunCommand,
    ];

    /// Placeholder name as it appears between `{{` and `}}` in templates.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Language => "LANGUAGE",
            Self::Runtime => "RUNTIME",
            Self::SetupCommand => "SETUP_COMMAND",
            Self::BuildCommand => "BUILD_COMMAND",
            Self::TestCommand => "TEST_COMMAND",
            Self::LintCommand => "LINT_COMMAND",
            Self::RunCommand => "RUN_COMMAND",
        }
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placeholder())
    }
}

/// One resolved fact with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestFact {
    pub key: FactKey,
    pub value: String,
    /// Manifest filename the value came from (e.g. `package.json`).
    pub source: String,
}

/// Per-run fact set. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ManifestFacts {
    resolved: HashMap<FactKey, ManifestFact>,
}

impl ManifestFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a fact if it is still unknown.
    ///
    /// Returns `false` (and changes nothing) when an earlier source already
    /// resolved the key — precedence is positional, not last-writer.
    pub fn resolve(
        &mut self,
        key: FactKey,
        value: impl Into<String>,
        source: impl Into<String>,
    ) -> bool {
        if self.resolved.contains_key(&key) {
            return false;
        }
        self.resolved.insert(
            key,
            ManifestFact {
                key,
                value: value.into(),
                source: source.into(),
            },
        );
        true
    }

    pub fn get(&self, key: FactKey) -> Option<&str> {
        self.resolved.get(&key).map(|f| f.value.as_str())
    }

    pub fn source_of(&self, key: FactKey) -> Option<&str> {
        self.resolved.get(&key).map(|f| f.source.as_str())
    }

    pub fn is_resolved(&self, key: FactKey) -> bool {
        self.resolved.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Resolved facts in a stable order (by placeholder name).
    pub fn iter(&self) -> impl Iterator<Item = &ManifestFact> {
        FactKey::ALL.iter().filter_map(|k| self.resolved.get(k))
    }

    /// Render a template body, substituting `{{KEY}}` placeholders.
    ///
    /// Known keys substitute their resolved value; anything unresolved —
    /// including placeholder names this version does not know — becomes the
    /// literal [`SENTINEL`] token. Rendering never fails.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    let name = &after[..close];
                    let value = FactKey::ALL
                        .iter()
                        .find(|k| k.placeholder() == name)
                        .and_then(|k| self.get(*k))
                        .unwrap_or(SENTINEL);
                    out.push_str(value);
                    rest = &after[close + 2..];
                }
                _ => {
                    // Not a placeholder; emit the braces verbatim and move on.
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Placeholder names are SCREAMING_SNAKE_CASE, nothing else.
fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
