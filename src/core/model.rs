//! Unified Finding Model
//!
//! Every check (formatting, links, terminology, ...) maps its results to
//! `Finding`s collected into a `Report` before rendering output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Hard failure; fails a CI gate
    Issue,
    /// Soft finding; informational only
    Warning,
}

/// A single finding reported against a document (or a pseudo-key such as
/// `completeness`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,

    /// Stable machine-readable code, e.g. `LINK_MISSING_FILE`
    pub code: String,

    /// Report key: document filename or pseudo-key
    pub file: String,

    /// 1-based line number, when the finding points at a line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Human-readable message
    pub message: String,
}

impl Finding {
    /// Create a new issue
    pub fn issue(code: &str, file: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Issue,
            code: code.to_string(),
            file: file.to_string(),
            line: None,
            message: message.into(),
        }
    }

    /// Create a new warning
    pub fn warning(code: &str, file: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            file: file.to_string(),
            line: None,
            message: message.into(),
        }
    }

    /// Attach a line number
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_issue(&self) -> bool {
        self.severity == Severity::Issue
    }
}

/// Findings grouped into issues and warnings, each keyed by report key.
///
/// Keys iterate in sorted order; findings under a key keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub issues: BTreeMap<String, Vec<Finding>>,
    pub warnings: BTreeMap<String, Vec<Finding>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        let bucket = if finding.is_issue() {
            &mut self.issues
        } else {
            &mut self.warnings
        };
        bucket.entry(finding.file.clone()).or_default().push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.push(finding);
        }
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: Report) {
        for (_, findings) in other.issues.into_iter().chain(other.warnings) {
            self.extend(findings);
        }
    }

    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }

    /// All findings: issues first, then warnings, each grouped by key
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.issues.values().chain(self.warnings.values()).flatten()
    }
}

impl FromIterator<Finding> for Report {
    fn from_iter<T: IntoIterator<Item = Finding>>(iter: T) -> Self {
        let mut report = Report::new();
        report.extend(iter);
        report
    }
}
