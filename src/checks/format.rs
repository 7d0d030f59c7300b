//! Formatting checks
//!
//! Per document:
//! - filename convention
//! - exactly one top-level heading
//! - language identifier on every code fence
//! - `-` as list marker
//! - trailing newline

use regex::Regex;

use crate::core::error::DocError;
use crate::core::model::Finding;
use crate::docs::corpus::Document;
use crate::docs::markdown::{scan_lines, LineKind};

pub struct FormatChecker {
    filename_re: Regex,
}

impl FormatChecker {
    pub fn new(filename_pattern: &str) -> Result<Self, DocError> {
        let filename_re = Regex::new(filename_pattern).map_err(|source| DocError::Pattern {
            pattern: filename_pattern.to_string(),
            source,
        })?;
        Ok(Self { filename_re })
    }

    /// All formatting issues of one document
    pub fn check(&self, doc: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        let name = doc.name.as_str();

        if !self.filename_re.is_match(name) {
            findings.push(Finding::issue(
                "FILENAME_CONVENTION",
                name,
                "filename does not follow the convention: use lowercase letters, digits and underscores",
            ));
        }

        match doc.h1_count() {
            0 => findings.push(Finding::issue("MISSING_H1", name, "missing top-level heading")),
            1 => {}
            n => findings.push(Finding::issue(
                "MULTIPLE_H1",
                name,
                format!("too many top-level headings: {} (expected 1)", n),
            )),
        }

        let mut block = 0;
        for line in scan_lines(&doc.content) {
            match line.kind {
                LineKind::FenceOpen => {
                    block += 1;
                    if fence_info(line.text).is_empty() {
                        findings.push(
                            Finding::issue(
                                "CODE_BLOCK_NO_LANG",
                                name,
                                format!("code block #{} is missing a language identifier", block),
                            )
                            .at_line(line.number),
                        );
                    }
                }
                LineKind::Prose if is_star_list_item(line.text) => {
                    findings.push(
                        Finding::issue(
                            "LIST_MARKER",
                            name,
                            "list items should use '-' instead of '*'",
                        )
                        .at_line(line.number),
                    );
                }
                _ => {}
            }
        }

        if !doc.content.is_empty() && !doc.content.ends_with('\n') {
            findings.push(Finding::issue(
                "NO_TRAILING_NEWLINE",
                name,
                "file does not end with a newline",
            ));
        }

        findings
    }
}

fn fence_info(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| c == '`' || c == '~')
        .trim()
}

/// `* item`, but not a `* * *` thematic break
fn is_star_list_item(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("* ") && !trimmed.chars().all(|c| c == '*' || c == ' ')
}
