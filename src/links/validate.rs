//! Link extraction and validation against the anchor index

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::Finding;
use crate::docs::corpus::Document;
use crate::docs::markdown::{scan_lines, LineKind};
use crate::links::anchor::AnchorIndex;

/// Inline link `[text](target)`; the text may wrap across lines
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]\(([^)]+)\)").expect("Invalid LINK_RE regex"));

/// Image `![alt](src)`, possibly nested as a link's text
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("Invalid IMAGE_RE regex"));

/// Inline code span; links inside are not links
static CODE_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`]*`").expect("Invalid CODE_SPAN_RE regex"));

/// An inline link found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub target: String,
    /// 1-based line number of the opening `[`
    pub line: u32,
}

/// What a link target refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Never validated
    External,
    /// `./file[#anchor]`; `file` may be empty
    RelativeFile {
        file: &'a str,
        anchor: Option<&'a str>,
    },
    /// `#anchor` within the linking document
    SameDocument(&'a str),
    /// Anything else, taken as a document filename
    Bare {
        file: &'a str,
        anchor: Option<&'a str>,
    },
}

/// Replace every char except newlines with spaces of the same byte width
fn blank(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' { "\n".to_string() } else { " ".repeat(c.len_utf8()) })
        .collect()
}

/// Document text with fenced code, code spans and images blanked out
///
/// Every line keeps its byte length, so offsets map back to line numbers.
fn linkable_text(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    for line in scan_lines(content) {
        if line.kind == LineKind::Prose {
            text.push_str(&CODE_SPAN_RE.replace_all(line.text, |caps: &regex::Captures| blank(&caps[0])));
        } else {
            text.push_str(&blank(line.text));
        }
        text.push('\n');
    }
    IMAGE_RE
        .replace_all(&text, |caps: &regex::Captures| blank(&caps[0]))
        .into_owned()
}

/// Extract inline links in document order
///
/// Fenced code, inline code spans and images are skipped.
pub fn extract_links(content: &str) -> Vec<Link> {
    let text = linkable_text(content);
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect();

    let mut links = Vec::new();
    for caps in LINK_RE.captures_iter(&text) {
        let (Some(whole), Some(label), Some(raw)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let target = clean_target(raw.as_str());
        if target.is_empty() {
            continue;
        }
        let line = line_starts.partition_point(|start| *start <= whole.start());
        links.push(Link {
            text: label.as_str().split_whitespace().collect::<Vec<_>>().join(" "),
            target: target.to_string(),
            line: line as u32,
        });
    }

    links
}

/// Drop angle brackets and a trailing link title
fn clean_target(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('<')
        .and_then(|r| r.strip_suffix('>'))
        .unwrap_or(raw);
    raw.split_whitespace().next().unwrap_or_default()
}

fn split_anchor(target: &str) -> (&str, Option<&str>) {
    match target.split_once('#') {
        Some((file, anchor)) => (file, Some(anchor)),
        None => (target, None),
    }
}

/// Classify a link target by prefix
pub fn classify<'a>(target: &'a str, external_prefixes: &[String]) -> LinkTarget<'a> {
    if external_prefixes
        .iter()
        .any(|prefix| target.starts_with(prefix.as_str()))
    {
        return LinkTarget::External;
    }

    if let Some(rest) = target.strip_prefix("./") {
        let (file, anchor) = split_anchor(rest);
        return LinkTarget::RelativeFile { file, anchor };
    }

    if let Some(anchor) = target.strip_prefix('#') {
        return LinkTarget::SameDocument(anchor);
    }

    let (file, anchor) = split_anchor(target);
    LinkTarget::Bare { file, anchor }
}

/// Validates links of one document against a completed index
pub struct LinkValidator<'a> {
    index: &'a AnchorIndex,
    external_prefixes: &'a [String],
}

impl<'a> LinkValidator<'a> {
    pub fn new(index: &'a AnchorIndex, external_prefixes: &'a [String]) -> Self {
        Self {
            index,
            external_prefixes,
        }
    }

    /// Findings for every link in `doc`, in document order
    pub fn validate(&self, doc: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        for link in extract_links(&doc.content) {
            match classify(&link.target, self.external_prefixes) {
                LinkTarget::External => {}
                LinkTarget::RelativeFile { file, anchor } | LinkTarget::Bare { file, anchor } => {
                    if file.is_empty() {
                        continue;
                    }
                    if !self.index.contains_file(file) {
                        findings.push(
                            Finding::issue(
                                "LINK_MISSING_FILE",
                                &doc.name,
                                format!("link points to nonexistent file: {}", file),
                            )
                            .at_line(link.line),
                        );
                        continue;
                    }
                    if let Some(anchor) = anchor.filter(|a| !a.is_empty()) {
                        if !self.index.has_anchor(file, anchor) {
                            findings.push(
                                Finding::warning(
                                    "LINK_MISSING_ANCHOR",
                                    &doc.name,
                                    format!(
                                        "link points to possibly nonexistent anchor: {}#{}",
                                        file, anchor
                                    ),
                                )
                                .at_line(link.line),
                            );
                        }
                    }
                }
                LinkTarget::SameDocument(anchor) => {
                    if !self.index.has_anchor(&doc.name, anchor) {
                        findings.push(
                            Finding::warning(
                                "ANCHOR_MISSING",
                                &doc.name,
                                format!("anchor link may not exist: #{}", anchor),
                            )
                            .at_line(link.line),
                        );
                    }
                }
            }
        }

        findings
    }
}
