//! Heading anchors and the per-document anchor index
//!
//! The slug algorithm approximates what renderers generate, so anchors that
//! fail to resolve are only ever reported as warnings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::config::DuplicateAnchors;
use crate::docs::corpus::{DocSet, Document};

/// Characters outside word/whitespace/hyphen are dropped
static STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("Invalid STRIP_RE regex"));

/// Runs of whitespace and underscores become one hyphen
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_]+").expect("Invalid SEPARATOR_RE regex"));

/// Normalize heading text into an anchor slug
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lower, "");
    SEPARATOR_RE.replace_all(&stripped, "-").into_owned()
}

/// Slugs of one document's headings, with repeats handled per `policy`
pub fn document_anchors(doc: &Document, policy: DuplicateAnchors) -> BTreeSet<String> {
    let mut anchors = BTreeSet::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for heading in &doc.headings {
        let slug = slugify(&heading.text);
        let repeats = seen.entry(slug.clone()).or_insert(0);

        if *repeats > 0 && policy == DuplicateAnchors::Suffix {
            anchors.insert(format!("{}-{}", slug, repeats));
        }
        *repeats += 1;
        anchors.insert(slug);
    }

    anchors
}

/// Filename -> anchors, built once before any link is validated
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AnchorIndex {
    anchors: BTreeMap<String, BTreeSet<String>>,
}

impl AnchorIndex {
    /// Build the complete index for every document in the set
    pub fn build(docs: &DocSet, policy: DuplicateAnchors) -> Self {
        let anchors = docs
            .iter()
            .map(|doc| (doc.name.clone(), document_anchors(doc, policy)))
            .collect();
        Self { anchors }
    }

    /// Whether `file` is a known document
    pub fn contains_file(&self, file: &str) -> bool {
        self.anchors.contains_key(file)
    }

    /// Whether `file` defines `anchor`; false for unknown files
    pub fn has_anchor(&self, file: &str, anchor: &str) -> bool {
        self.anchors
            .get(file)
            .map(|set| set.contains(anchor))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }
}
