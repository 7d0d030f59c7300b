//! Terminology consistency: a term and its translation should not be mixed

use regex::Regex;
use std::collections::BTreeMap;

use crate::core::error::DocError;
use crate::core::model::Finding;
use crate::docs::corpus::Document;

struct Term {
    term: String,
    translation: String,
    word_re: Regex,
}

pub struct Terminology {
    terms: Vec<Term>,
}

impl Terminology {
    pub fn new(table: &BTreeMap<String, String>) -> Result<Self, DocError> {
        let terms = table
            .iter()
            .filter(|(_, translation)| !translation.is_empty())
            .map(|(term, translation)| {
                let pattern = format!(r"\b{}\b", regex::escape(term));
                let word_re = Regex::new(&pattern)
                    .map_err(|source| DocError::Pattern { pattern, source })?;
                Ok::<_, DocError>(Term {
                    term: term.clone(),
                    translation: translation.clone(),
                    word_re,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { terms })
    }

    pub fn check(&self, doc: &Document) -> Vec<Finding> {
        self.terms
            .iter()
            .filter(|t| t.word_re.is_match(&doc.content) && doc.content.contains(&t.translation))
            .map(|t| {
                Finding::warning(
                    "TERM_MIXED",
                    &doc.name,
                    format!(
                        "term '{}' is used both in English and as '{}'; pick one",
                        t.term, t.translation
                    ),
                )
            })
            .collect()
    }
}
