//! Health report model: findings, severities, and the pass/fail summary.

use serde::Serialize;

/// How serious a finding is.
///
/// `Warning` findings are advisory; `Error` findings fail a strict check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Which health check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    MissingFile,
    PlaceholderResidue,
    LineBudget,
    BrokenReference,
    DuplicateContent,
}

/// One diagnostic from a health check.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    /// Relative path of the file the finding is about.
    pub file: String,
    /// 1-based line number, when the finding points at a specific line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl Finding {
    pub fn warning(kind: FindingKind, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    pub fn error(kind: FindingKind, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Line count of one managed file, for the size table and top-offender list.
#[derive(Debug, Clone, Serialize)]
pub struct FileSize {
    pub file: String,
    pub lines: usize,
}

/// Aggregated result of a health run over one project tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthReport {
    pub findings: Vec<Finding>,
    /// Sizes of every managed file that exists, in catalog order.
    pub file_sizes: Vec<FileSize>,
}

impl HealthReport {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// True when the tree passes a strict check: no error-severity findings.
    pub fn passes_strict(&self) -> bool {
        self.error_count() == 0
    }

    /// The `k` largest managed files, by line count, largest first.
    /// Ties break toward catalog order.
    pub fn top_offenders(&self, k: usize) -> Vec<&FileSize> {
        let mut sizes: Vec<&FileSize> = self.file_sizes.iter().collect();
        sizes.sort_by(|a, b| b.lines.cmp(&a.lines));
        sizes.truncate(k);
        sizes
    }
}
