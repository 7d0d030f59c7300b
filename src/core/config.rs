//! Linter configuration
//!
//! Loaded from `docqa.toml` under the project root (or `--config`); every
//! field falls back to its default when absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::DocError;

/// Default config filename looked up under the project root
pub const CONFIG_FILE: &str = "docqa.toml";

/// What to do when several headings in one document share a slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAnchors {
    /// Register `slug-1`, `slug-2`, ... for repeats, as renderers do
    #[default]
    Suffix,
    /// Register only the base slug
    Merge,
}

/// A required-key rule for YAML configuration examples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YamlRule {
    /// Key that activates the rule when a block line starts with it (e.g. `chat_model:`)
    pub trigger: String,
    /// Keys that must then also be present
    pub requires: Vec<String>,
}

impl YamlRule {
    fn new(trigger: &str, requires: &[&str]) -> Self {
        Self {
            trigger: trigger.to_string(),
            requires: requires.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Settings for backtick-quoted path references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRefConfig {
    /// File extensions recognized as path references
    #[serde(default = "default_path_extensions")]
    pub extensions: Vec<String>,

    /// Also check directory references ending in `/`
    #[serde(default = "default_true")]
    pub check_dirs: bool,

    /// References starting with this prefix are placeholders and never checked
    #[serde(default = "default_placeholder_prefix")]
    pub placeholder_prefix: String,
}

impl Default for PathRefConfig {
    fn default() -> Self {
        Self {
            extensions: default_path_extensions(),
            check_dirs: true,
            placeholder_prefix: default_placeholder_prefix(),
        }
    }
}

/// Settings for code example syntax checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeExampleConfig {
    /// Fence languages treated as Python
    #[serde(default = "default_code_languages")]
    pub languages: Vec<String>,

    /// A block is only syntax-checked when it contains one of these
    #[serde(default = "default_runnable_markers")]
    pub runnable_markers: Vec<String>,
}

impl Default for CodeExampleConfig {
    fn default() -> Self {
        Self {
            languages: default_code_languages(),
            runnable_markers: default_runnable_markers(),
        }
    }
}

/// Full linter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Documentation directory, relative to the project root
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Include dotfiles in every scan
    #[serde(default)]
    pub include_hidden: bool,

    /// Regex every document filename must match
    #[serde(default = "default_filename_pattern")]
    pub filename_pattern: String,

    /// Link targets with these prefixes are external and never validated
    #[serde(default = "default_external_prefixes")]
    pub external_prefixes: Vec<String>,

    #[serde(default)]
    pub duplicate_anchors: DuplicateAnchors,

    /// Required documents shorter than this (trimmed, in chars) are flagged
    #[serde(default = "default_min_doc_chars")]
    pub min_doc_chars: usize,

    /// Term -> translation; mixing both in one document is flagged
    #[serde(default = "default_terminology")]
    pub terminology: BTreeMap<String, String>,

    /// Filename -> description of documents that must exist
    #[serde(default = "default_required_docs")]
    pub required_docs: BTreeMap<String, String>,

    /// Filename -> strings that document must mention
    #[serde(default = "default_required_mentions")]
    pub required_mentions: BTreeMap<String, Vec<String>>,

    /// Documents whose YAML examples are checked against `yaml_rules`
    #[serde(default = "default_config_docs")]
    pub config_docs: Vec<String>,

    #[serde(default = "default_yaml_rules")]
    pub yaml_rules: Vec<YamlRule>,

    /// Documents whose Python examples containing `def ` are syntax-checked
    #[serde(default = "default_api_docs")]
    pub api_docs: Vec<String>,

    #[serde(default)]
    pub path_refs: PathRefConfig,

    #[serde(default)]
    pub code_examples: CodeExampleConfig,
}

fn default_docs_dir() -> String {
    "docs".to_string()
}

fn default_filename_pattern() -> String {
    r"^[a-z0-9_.]+\.md$".to_string()
}

fn default_external_prefixes() -> Vec<String> {
    vec![
        "http://".to_string(),
        "https://".to_string(),
        "mailto:".to_string(),
    ]
}

fn default_min_doc_chars() -> usize {
    100
}

fn default_terminology() -> BTreeMap<String, String> {
    [
        ("Agent", "智能体"),
        ("Pipeline", "流水线"),
        ("Tool", "工具"),
        ("Storyboard", "分镜"),
        ("Shot", "镜头"),
        ("Frame", "帧"),
        ("Character Portrait", "角色画像"),
        ("Reference Image", "参考图"),
        ("Camera", "摄像机"),
        ("Scene", "场景"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_required_docs() -> BTreeMap<String, String> {
    [
        ("getting_started.md", "getting started guide"),
        ("architecture.md", "system architecture"),
        ("agents.md", "agents in depth"),
        ("pipelines.md", "pipelines in depth"),
        ("tools.md", "tools and integrations"),
        ("api_reference.md", "API reference"),
        ("configuration.md", "configuration reference"),
        ("examples.md", "examples and best practices"),
        ("troubleshooting.md", "troubleshooting"),
        ("faq.md", "frequently asked questions"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_required_mentions() -> BTreeMap<String, Vec<String>> {
    let mut mentions = BTreeMap::new();
    mentions.insert(
        "examples.md".to_string(),
        ["Idea2Video", "Script2Video", "角色画像", "分镜设计"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    mentions
}

fn default_config_docs() -> Vec<String> {
    vec![
        "getting_started.md".to_string(),
        "configuration.md".to_string(),
        "tools.md".to_string(),
    ]
}

fn default_yaml_rules() -> Vec<YamlRule> {
    vec![
        YamlRule::new("chat_model:", &["init_args:", "model:"]),
        YamlRule::new("image_generator:", &["class_path:"]),
        YamlRule::new("video_generator:", &["class_path:"]),
    ]
}

fn default_api_docs() -> Vec<String> {
    vec!["api_reference.md".to_string()]
}

fn default_path_extensions() -> Vec<String> {
    vec!["py".to_string(), "yaml".to_string(), "json".to_string()]
}

fn default_placeholder_prefix() -> String {
    "path/to".to_string()
}

fn default_code_languages() -> Vec<String> {
    vec!["python".to_string(), "py".to_string()]
}

fn default_runnable_markers() -> Vec<String> {
    vec!["import".to_string(), "asyncio.run".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            include_hidden: false,
            filename_pattern: default_filename_pattern(),
            external_prefixes: default_external_prefixes(),
            duplicate_anchors: DuplicateAnchors::default(),
            min_doc_chars: default_min_doc_chars(),
            terminology: default_terminology(),
            required_docs: default_required_docs(),
            required_mentions: default_required_mentions(),
            config_docs: default_config_docs(),
            yaml_rules: default_yaml_rules(),
            api_docs: default_api_docs(),
            path_refs: PathRefConfig::default(),
            code_examples: CodeExampleConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file
    pub fn load(path: &Path) -> Result<Self, DocError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| DocError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `docqa.toml` from the project root or return defaults
    pub fn load_or_default(root: &Path) -> Result<Self, DocError> {
        let config_path = root.join(CONFIG_FILE);

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}
