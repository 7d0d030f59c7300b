//! Workspace: project root, configuration and the loaded documents

use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::error::DocError;
use crate::core::paths::resolve;
use crate::docs::corpus::DocSet;

/// Everything one invocation works on
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Project root; referenced source paths resolve against it
    pub root: PathBuf,
    pub config: Config,
    pub docs: DocSet,
}

impl Workspace {
    /// Load the documents selected by `config`
    ///
    /// `docs_dir` overrides `config.docs_dir`; relative paths resolve against
    /// `root`.
    pub fn open(root: &Path, config: Config, docs_dir: Option<&Path>) -> Result<Self, DocError> {
        let dir = match docs_dir {
            Some(dir) => resolve(root, dir),
            None => resolve(root, Path::new(&config.docs_dir)),
        };

        let docs = DocSet::load(&dir, config.include_hidden)?;
        if docs.is_empty() {
            tracing::warn!(dir = %docs.dir().display(), "no Markdown documents found");
        } else {
            tracing::info!(dir = %docs.dir().display(), documents = docs.len(), "scanning documentation");
        }

        Ok(Self {
            root: root.to_path_buf(),
            config,
            docs,
        })
    }
}
