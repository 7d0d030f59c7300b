//! Links module - Cross-document anchor index and link validation
//!
//! Two passes: the anchor index is built for every document first, then each
//! document's links are validated against the finished, read-only index.

pub mod anchor;
pub mod validate;

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::model::{Finding, Report};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::docs::workspace::Workspace;
use anchor::AnchorIndex;
use validate::LinkValidator;

/// Build the index, then validate every document's links
pub fn check_links(ws: &Workspace) -> Report {
    let index = AnchorIndex::build(&ws.docs, ws.config.duplicate_anchors);
    tracing::debug!(documents = index.len(), "anchor index built");

    let validator = LinkValidator::new(&index, &ws.config.external_prefixes);

    #[cfg(feature = "parallel")]
    let per_doc: Vec<Vec<Finding>> = ws
        .docs
        .documents()
        .par_iter()
        .map(|doc| validator.validate(doc))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_doc: Vec<Vec<Finding>> = ws.docs.documents().iter().map(|doc| validator.validate(doc)).collect();

    per_doc.into_iter().flatten().collect()
}

/// Run the links command
pub fn run_links(ws: &Workspace, render: RenderConfig) -> Result<ExitCode> {
    tracing::info!("checking links");
    let report = check_links(ws);
    if report.is_empty() {
        tracing::info!("all links resolve");
    }

    Renderer::with_config(render).render_to(&report, std::io::stdout().lock())?;

    Ok(if report.has_issues() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run the anchors command: print the anchor index
pub fn run_anchors(ws: &Workspace, render: RenderConfig) -> Result<()> {
    let index = AnchorIndex::build(&ws.docs, ws.config.duplicate_anchors);

    let output = match render.format {
        OutputFormat::Json if render.pretty => serde_json::to_string_pretty(&index)?,
        OutputFormat::Json => serde_json::to_string(&index)?,
        OutputFormat::Jsonl => index
            .iter()
            .map(|(file, anchors)| {
                serde_json::to_string(&serde_json::json!({ "file": file, "anchors": anchors }))
            })
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Markdown => {
            let mut out = String::new();
            for (file, anchors) in index.iter() {
                out.push_str(&format!("### `{}`\n\n", file));
                for anchor in anchors {
                    out.push_str(&format!("- `#{}`\n", anchor));
                }
                out.push('\n');
            }
            out
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (file, anchors) in index.iter() {
                out.push_str(&format!("{}\n", file.bold()));
                for anchor in anchors {
                    out.push_str(&format!("   #{}\n", anchor));
                }
            }
            out
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::docs::corpus::{DocSet, Document};

    fn workspace(docs: Vec<Document>) -> Workspace {
        Workspace {
            root: ".".into(),
            config: Config::default(),
            docs: DocSet::from_documents("docs", docs),
        }
    }

    #[test]
    fn test_check_links_end_to_end() {
        let ws = workspace(vec![
            Document::new("intro.md", "intro.md", "# Intro\n\n## Getting Started!\n"),
            Document::new(
                "guide.md",
                "guide.md",
                "# Guide\n\n[ok](./intro.md#getting-started)\n[warn](./intro.md#nope)\n[bad](./gone.md)\n",
            ),
        ]);

        let report = check_links(&ws);
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.issues["guide.md"][0].line, Some(5));
        assert_eq!(report.warnings["guide.md"][0].line, Some(4));
    }

    #[test]
    fn test_check_links_anchor_needs_whole_index() {
        // a.md links forward to z.md, which sorts after it
        let ws = workspace(vec![
            Document::new("a.md", "a.md", "# A\n[z](./z.md#last)\n"),
            Document::new("z.md", "z.md", "# Z\n## Last\n"),
        ]);
        assert!(check_links(&ws).is_empty());
    }
}
