//! Accuracy checks: configuration examples, API examples, referenced paths

use regex::Regex;
use std::path::Path;

use crate::checks::python::PythonSyntax;
use crate::checks::{blocks_with_lang, is_signature_only};
use crate::core::config::{Config, PathRefConfig, YamlRule};
use crate::core::error::DocError;
use crate::core::model::Finding;
use crate::core::paths::join_normalized;
use crate::docs::corpus::DocSet;
use crate::docs::markdown::prose_lines;

const YAML_LANGS: &[&str] = &["yaml", "yml"];

/// Whether a YAML block has `key` at the start of some line (list dashes allowed)
fn has_key(body: &str, key: &str) -> bool {
    body.lines().any(|line| {
        let line = line.trim_start();
        let line = line.strip_prefix("- ").unwrap_or(line).trim_start();
        line.starts_with(key)
    })
}

/// YAML examples in the configured documents must carry the keys their rules require
pub fn check_config_examples(docs: &DocSet, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for name in &config.config_docs {
        let Some(doc) = docs.get(name) else {
            continue;
        };

        let langs: Vec<String> = YAML_LANGS.iter().map(|s| s.to_string()).collect();
        for (idx, block) in blocks_with_lang(doc, &langs).iter().enumerate() {
            for YamlRule { trigger, requires } in &config.yaml_rules {
                if !has_key(&block.body, trigger) {
                    continue;
                }
                for key in requires.iter().filter(|key| !has_key(&block.body, key)) {
                    findings.push(
                        Finding::issue(
                            "CONFIG_MISSING_KEY",
                            &doc.name,
                            format!(
                                "config example #{}: `{}` is missing `{}`",
                                idx + 1,
                                trigger.trim_end_matches(':'),
                                key.trim_end_matches(':')
                            ),
                        )
                        .at_line(block.line),
                    );
                }
            }
        }
    }

    findings
}

/// Python examples in API documents that define functions must parse
pub fn check_api_examples(
    docs: &DocSet,
    config: &Config,
    syntax: &mut PythonSyntax,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for name in &config.api_docs {
        let Some(doc) = docs.get(name) else {
            continue;
        };

        for (idx, block) in blocks_with_lang(doc, &config.code_examples.languages)
            .iter()
            .enumerate()
        {
            if is_signature_only(&block.body) || !block.body.contains("def ") {
                continue;
            }
            if let Some(err) = syntax.check(&block.body) {
                findings.push(
                    Finding::issue(
                        "API_SYNTAX",
                        &doc.name,
                        format!("API example #{} may have a syntax error: {}", idx + 1, err),
                    )
                    .at_line(block.line),
                );
            }
        }
    }

    findings
}

/// Matcher for backtick-quoted path references
pub struct PathRefs {
    file_re: Option<Regex>,
    dir_re: Option<Regex>,
    placeholder_prefix: String,
}

impl PathRefs {
    pub fn new(config: &PathRefConfig) -> Result<Self, DocError> {
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| DocError::Pattern { pattern, source })
        };

        let file_re = if config.extensions.is_empty() {
            None
        } else {
            let exts = config
                .extensions
                .iter()
                .map(|ext| regex::escape(ext))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(format!(r"`([a-zA-Z_/]+\.(?:{}))`", exts))?)
        };

        let dir_re = if config.check_dirs {
            Some(compile(r"`([a-zA-Z_/]+/)`".to_string())?)
        } else {
            None
        };

        Ok(Self {
            file_re,
            dir_re,
            placeholder_prefix: config.placeholder_prefix.clone(),
        })
    }

    /// Path references on one line, in order of appearance
    pub fn find<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut found: Vec<(usize, &str)> = Vec::new();
        for re in self.file_re.iter().chain(self.dir_re.iter()) {
            for caps in re.captures_iter(line) {
                if let Some(m) = caps.get(1) {
                    found.push((m.start(), m.as_str()));
                }
            }
        }
        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, path)| path).collect()
    }

    fn is_placeholder(&self, path: &str) -> bool {
        !self.placeholder_prefix.is_empty() && path.starts_with(self.placeholder_prefix.as_str())
    }
}

/// Referenced project paths should exist under the project root
pub fn check_path_refs(docs: &DocSet, root: &Path, refs: &PathRefs) -> Vec<Finding> {
    let mut findings = Vec::new();

    for doc in docs {
        for (number, line) in prose_lines(&doc.content) {
            for path in refs.find(line) {
                if refs.is_placeholder(path) || join_normalized(root, path).exists() {
                    continue;
                }
                findings.push(
                    Finding::warning(
                        "PATH_NOT_FOUND",
                        &doc.name,
                        format!("referenced path may not exist: {}", path),
                    )
                    .at_line(number),
                );
            }
        }
    }

    findings
}
