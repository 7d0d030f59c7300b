//! Document corpus loading
//!
//! Uses the ignore crate for the directory walk. Only `*.md` files directly
//! inside the docs directory are documents.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::core::error::DocError;
use crate::core::paths::{is_hidden, is_markdown};
use crate::docs::markdown::{extract_headings, Heading};

/// A Markdown document identified by its filename
#[derive(Debug, Clone)]
pub struct Document {
    /// Filename, used as report key and link target
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    /// Headings in document order
    pub headings: Vec<Heading>,
}

impl Document {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let headings = extract_headings(&content);
        Self {
            name: name.into(),
            path: path.into(),
            content,
            headings,
        }
    }

    /// Read a document from disk; any failure is fatal
    pub fn read(path: &Path) -> Result<Self, DocError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, path, content))
    }

    /// Number of top-level (`#`) headings
    pub fn h1_count(&self) -> usize {
        self.headings.iter().filter(|h| h.level == 1).count()
    }
}

/// All documents of one run, sorted by filename
#[derive(Debug, Clone, Default)]
pub struct DocSet {
    dir: PathBuf,
    docs: Vec<Document>,
}

impl DocSet {
    /// Load every `*.md` file in `dir`
    pub fn load(dir: &Path, include_hidden: bool) -> Result<Self, DocError> {
        if !dir.is_dir() {
            return Err(DocError::DocsDirMissing(dir.to_path_buf()));
        }

        let mut builder = WalkBuilder::new(dir);
        builder.standard_filters(false).max_depth(Some(1));

        let mut docs = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|source| DocError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;

            let path = entry.path();
            if entry.depth() == 0 || !path.is_file() || !is_markdown(path) {
                continue;
            }
            if !include_hidden && is_hidden(path) {
                tracing::debug!(path = %path.display(), "skipping hidden document");
                continue;
            }

            let doc = Document::read(path)?;
            tracing::debug!(path = %doc.path.display(), headings = doc.headings.len(), "loaded document");
            docs.push(doc);
        }

        tracing::debug!(dir = %dir.display(), count = docs.len(), "loaded documents");
        Ok(Self::from_documents(dir, docs))
    }

    /// Build a set from already-loaded documents
    pub fn from_documents(dir: impl Into<PathBuf>, mut docs: Vec<Document>) -> Self {
        docs.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            dir: dir.into(),
            docs,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.docs
            .binary_search_by(|doc| doc.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.docs[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocSet {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
