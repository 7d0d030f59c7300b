//! Code example checks: complete Python examples must parse

use crate::checks::python::PythonSyntax;
use crate::checks::{blocks_with_lang, is_signature_only};
use crate::core::config::CodeExampleConfig;
use crate::core::model::Finding;
use crate::docs::corpus::Document;

/// Pseudo-code: elided bodies or `<placeholder>` values
fn is_placeholder(body: &str) -> bool {
    body.contains("...") || (body.contains('<') && body.contains('>'))
}

fn is_runnable(body: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| body.contains(marker.as_str()))
}

pub fn check_code_examples(
    doc: &Document,
    config: &CodeExampleConfig,
    syntax: &mut PythonSyntax,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, block) in blocks_with_lang(doc, &config.languages).iter().enumerate() {
        let body = block.body.as_str();
        if is_placeholder(body)
            || is_signature_only(body)
            || body.trim_start().starts_with('@')
            || !is_runnable(body, &config.runnable_markers)
        {
            continue;
        }

        if let Some(err) = syntax.check(body) {
            tracing::debug!(file = %doc.name, block = idx + 1, "python example failed to parse");
            findings.push(
                Finding::issue(
                    "CODE_SYNTAX",
                    &doc.name,
                    format!("code example #{} has a syntax error: {}", idx + 1, err),
                )
                .at_line(block.line),
            );
        }
    }

    findings
}
