//! Health validation over an installed context tree.
//!
//! Five checks, all read-only:
//!
//! 1. **Presence** - every managed file exists
//! 2. **Placeholder residue** - no unfilled `TBD` values left behind
//! 3. **Line budget** - files stay readable (soft 200, hard 300 lines)
//! 4. **Reference integrity** - paths the router file points at exist
//! 5. **Duplicate content** - repeated blocks across files, which drift
//!    independently and contradict each other over time
//!
//! Budget comparisons are strictly greater-than: a file of exactly 200
//! lines is inside the soft budget, 201 is outside.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        FileSize, Finding, FindingKind, HealthReport, InstallMode, RelativePath, SENTINEL,
        TemplateCatalog, TemplateFile,
    },
    error::CtxResult,
};

/// Above this many lines a file draws a warning.
pub const SOFT_LINE_BUDGET: usize = 200;
/// Above this many lines a file is an error.
pub const HARD_LINE_BUDGET: usize = 300;
/// Length, in normalised lines, of the sliding window used for duplicate
/// detection.
const DUP_WINDOW: usize = 4;

/// Runs the health checks against one target tree.
pub struct HealthValidator {
    catalog: TemplateCatalog,
    soft_budget: usize,
    hard_budget: usize,
}

impl HealthValidator {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self::with_budgets(catalog, SOFT_LINE_BUDGET, HARD_LINE_BUDGET)
    }

    /// Override the default line budgets (config-driven).
    pub fn with_budgets(catalog: TemplateCatalog, soft: usize, hard: usize) -> Self {
        Self {
            catalog,
            soft_budget: soft,
            hard_budget: hard,
        }
    }

    /// Run all checks for the files `mode` requires and aggregate the
    /// findings.
    #[instrument(skip_all, fields(root = %root.display(), ?mode))]
    pub fn check(
        &self,
        fs: &dyn Filesystem,
        root: &Path,
        mode: InstallMode,
    ) -> CtxResult<HealthReport> {
        let mut report = HealthReport::default();

        // Read each managed file once; the individual checks share the text.
        let mut contents: Vec<(&TemplateFile, String)> = Vec::new();
        for file in self.catalog.files_for(mode) {
            let abs = root.join(file.path());
            if !fs.is_file(&abs) {
                report.push(Finding::error(
                    FindingKind::MissingFile,
                    file.path().as_str(),
                    "managed file is missing",
                ));
                continue;
            }
            // An unreadable file is a finding, not a reason to stop checking.
            match fs.read_to_string(&abs) {
                Ok(text) => contents.push((file, text)),
                Err(e) => report.push(Finding::error(
                    FindingKind::MissingFile,
                    file.path().as_str(),
                    format!("managed file could not be read: {e}"),
                )),
            }
        }

        for (file, text) in &contents {
            self.check_placeholders(file.path(), text, &mut report);
            // The preserved housekeeping file is not documentation and has
            // no readability budget.
            if !file.is_preserved() {
                self.check_line_budget(file.path(), text, &mut report);
            }
        }
        self.check_references(fs, root, &contents, &mut report);
        self.check_duplicates(&contents, &mut report);

        report.file_sizes = contents
            .iter()
            .map(|(file, text)| FileSize {
                file: file.path().as_str().to_string(),
                lines: text.lines().count(),
            })
            .collect();

        debug!(
            warnings = report.warning_count(),
            errors = report.error_count(),
            "health check finished"
        );
        Ok(report)
    }

    /// One warning per file, pointing at the first offending line.
    fn check_placeholders(&self, path: &RelativePath, text: &str, report: &mut HealthReport) {
        if let Some(idx) = text.lines().position(contains_sentinel) {
            report.push(
                Finding::warning(
                    FindingKind::PlaceholderResidue,
                    path.as_str(),
                    format!("unfilled '{SENTINEL}' value"),
                )
                .at_line(idx + 1),
            );
        }
    }

    fn check_line_budget(&self, path: &RelativePath, text: &str, report: &mut HealthReport) {
        let lines = text.lines().count();
        if lines > self.hard_budget {
            report.push(Finding::error(
                FindingKind::LineBudget,
                path.as_str(),
                format!("{lines} lines exceeds the hard budget of {}", self.hard_budget),
            ));
        } else if lines > self.soft_budget {
            report.push(Finding::warning(
                FindingKind::LineBudget,
                path.as_str(),
                format!("{lines} lines exceeds the soft budget of {}", self.soft_budget),
            ));
        }
    }

    /// The router file is the entry point agents read first; a reference it
    /// makes to a file that is not there sends every reader astray.
    fn check_references(
        &self,
        fs: &dyn Filesystem,
        root: &Path,
        contents: &[(&TemplateFile, String)],
        report: &mut HealthReport,
    ) {
        let router = self.catalog.router();
        let Some((_, text)) = contents.iter().find(|(f, _)| f.path() == router) else {
            // Missing router already reported by the presence check.
            return;
        };

        for (idx, line) in text.lines().enumerate() {
            for target in extract_references(line) {
                // References that escape the root are not checkable here.
                if RelativePath::try_new(target.as_str()).is_err() {
                    continue;
                }
                if !fs.exists(&root.join(&target)) {
                    report.push(
                        Finding::error(
                            FindingKind::BrokenReference,
                            router.as_str(),
                            format!("reference to missing file '{target}'"),
                        )
                        .at_line(idx + 1),
                    );
                }
            }
        }
    }

    /// One finding per file pair, however long the shared block is.
    fn check_duplicates(&self, contents: &[(&TemplateFile, String)], report: &mut HealthReport) {
        let windows: Vec<HashMap<String, usize>> = contents
            .iter()
            .map(|(_, text)| normalized_windows(text))
            .collect();

        for i in 0..contents.len() {
            for j in (i + 1)..contents.len() {
                let shared: Vec<(&String, usize)> = windows[i]
                    .iter()
                    .filter(|(w, _)| windows[j].contains_key(*w))
                    .map(|(w, line)| (w, *line))
                    .collect();
                if shared.is_empty() {
                    continue;
                }
                let first_line = shared.iter().map(|(_, l)| *l).min().unwrap_or(1);
                report.push(
                    Finding::warning(
                        FindingKind::DuplicateContent,
                        contents[i].0.path().as_str(),
                        format!(
                            "content duplicated in '{}' ({} matching {DUP_WINDOW}-line windows)",
                            contents[j].0.path(),
                            shared.len()
                        ),
                    )
                    .at_line(first_line),
                );
            }
        }
    }
}

/// Whole-token match: `TBD` bordered by non-alphanumerics (or line edges).
fn contains_sentinel(line: &str) -> bool {
    let bytes = line.as_bytes();
    let mut start = 0;
    while let Some(pos) = line[start..].find(SENTINEL) {
        let at = start + pos;
        let end = at + SENTINEL.len();
        let before_ok = at == 0 || !bytes[at - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = at + 1;
    }
    false
}

/// Pull candidate file references out of one line of the router file.
///
/// Two forms count: markdown link targets `[text](target)` and backtick
/// spans that look like relative paths (contain a `/` or end in `.md`).
/// External URLs and intra-document anchors are not file references.
fn extract_references(line: &str) -> Vec<String> {
    let mut refs = Vec::new();

    let mut rest = line;
    while let Some(open) = rest.find("](") {
        let after = &rest[open + 2..];
        let Some(close) = after.find(')') else { break };
        let target = after[..close].trim();
        if is_local_path(target) {
            refs.push(strip_anchor(target).to_string());
        }
        rest = &after[close + 1..];
    }

    // Odd-indexed parts of a backtick split are inside backticks.
    for (i, part) in line.split('`').enumerate() {
        if i % 2 == 0 {
            continue;
        }
        let span = part.trim();
        if !span.contains(char::is_whitespace)
            && (span.contains('/') || span.ends_with(".md"))
            && is_local_path(span)
        {
            refs.push(strip_anchor(span).to_string());
        }
    }

    refs
}

fn is_local_path(target: &str) -> bool {
    !target.is_empty()
        && !target.starts_with('#')
        && !target.contains("://")
        && !target.starts_with("mailto:")
        && !target.starts_with('/')
}

fn strip_anchor(target: &str) -> &str {
    target.split('#').next().unwrap_or(target)
}

/// Sliding windows of normalised lines, keyed by window text, valued by the
/// 1-based line number of the window's first line. Windows containing any
/// blank line are skipped so runs of empty space never count as duplication.
fn normalized_windows(text: &str) -> HashMap<String, usize> {
    let normalized: Vec<String> = text
        .lines()
        .map(|l| {
            l.split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        })
        .collect();

    let mut windows = HashMap::new();
    if normalized.len() < DUP_WINDOW {
        return windows;
    }
    for start in 0..=(normalized.len() - DUP_WINDOW) {
        let slice = &normalized[start..start + DUP_WINDOW];
        if slice.iter().any(|l| l.is_empty()) {
            continue;
        }
        windows
            .entry(slice.join("\n"))
            .or_insert(start + 1);
    }
    windows
}
