//! Completeness: required documents exist, have content, mention what they must

use crate::core::config::Config;
use crate::core::model::Finding;
use crate::docs::corpus::DocSet;

/// Report key for findings about the documentation set as a whole
pub const COMPLETENESS_KEY: &str = "completeness";

pub fn check_completeness(docs: &DocSet, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (name, description) in &config.required_docs {
        match docs.get(name) {
            None => findings.push(Finding::issue(
                "MISSING_DOC",
                COMPLETENESS_KEY,
                format!("missing required document: {} ({})", name, description),
            )),
            Some(doc) => {
                let chars = doc.content.trim().chars().count();
                if chars < config.min_doc_chars {
                    findings.push(Finding::warning(
                        "SHORT_DOC",
                        COMPLETENESS_KEY,
                        format!("document is too short: {} ({} chars)", name, chars),
                    ));
                }
            }
        }
    }

    for (name, mentions) in &config.required_mentions {
        let Some(doc) = docs.get(name) else {
            continue;
        };
        for mention in mentions.iter().filter(|m| !doc.content.contains(m.as_str())) {
            findings.push(Finding::warning(
                "MISSING_MENTION",
                &doc.name,
                format!("missing example for {}", mention),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::corpus::Document;
    use std::collections::BTreeMap;

    fn config() -> Config {
        let mut config = Config::default();
        config.required_docs = BTreeMap::from([
            ("intro.md".to_string(), "introduction".to_string()),
            ("faq.md".to_string(), "questions".to_string()),
        ]);
        config.required_mentions =
            BTreeMap::from([("intro.md".to_string(), vec!["Alpha".to_string(), "Beta".to_string()])]);
        config.min_doc_chars = 20;
        config
    }

    fn set(docs: Vec<(&str, &str)>) -> DocSet {
        DocSet::from_documents(
            "docs",
            docs.into_iter()
                .map(|(name, content)| Document::new(name, name, content))
                .collect(),
        )
    }

    #[test]
    fn test_missing_document() {
        let docs = set(vec![("intro.md", "# Intro\n\nAlpha and Beta are covered here.\n")]);
        let findings = check_completeness(&docs, &config());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_issue());
        assert_eq!(findings[0].file, COMPLETENESS_KEY);
        assert_eq!(findings[0].message, "missing required document: faq.md (questions)");
    }

    #[test]
    fn test_short_document_counts_trimmed_chars() {
        let docs = set(vec![
            ("intro.md", "# Intro\n\nAlpha and Beta are covered here.\n"),
            ("faq.md", "\n\n   # FAQ   \n\n\n"),
        ]);
        let findings = check_completeness(&docs, &config());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "SHORT_DOC");
        assert_eq!(findings[0].message, "document is too short: faq.md (5 chars)");
    }

    #[test]
    fn test_missing_mentions() {
        let docs = set(vec![
            ("intro.md", "# Intro\n\nOnly Alpha is covered in this page.\n"),
            ("faq.md", "# FAQ\n\nQuestions and answers go here.\n"),
        ]);
        let findings = check_completeness(&docs, &config());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file, "intro.md");
        assert_eq!(findings[0].message, "missing example for Beta");
    }

    #[test]
    fn test_mentions_for_absent_document_skipped() {
        let findings = check_completeness(&set(vec![]), &config());
        assert!(findings.iter().all(|f| f.code == "MISSING_DOC"));
        assert_eq!(findings.len(), 2);
    }
}
