//! Checks module - Formatting and quality checkers
//!
//! The formatting checker works per document. The quality checker runs five
//! phases in order: accuracy, code examples, links, terminology, completeness.

pub mod accuracy;
pub mod completeness;
pub mod examples;
pub mod format;
pub mod python;
pub mod terminology;

use anyhow::{Context, Result};
use std::process::ExitCode;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::error::DocError;
use crate::core::model::{Finding, Report};
use crate::core::render::{RenderConfig, Renderer};
use crate::docs::corpus::Document;
use crate::docs::markdown::{extract_code_blocks, CodeBlock};
use crate::docs::workspace::Workspace;
use crate::links::check_links;
use accuracy::PathRefs;
use format::FormatChecker;
use python::PythonSyntax;
use terminology::Terminology;

/// Code blocks of `doc` whose language is one of `langs` (case-insensitive)
pub(crate) fn blocks_with_lang(doc: &Document, langs: &[String]) -> Vec<CodeBlock> {
    extract_code_blocks(&doc.content)
        .into_iter()
        .filter(|block| langs.iter().any(|lang| lang.eq_ignore_ascii_case(&block.lang)))
        .collect()
}

/// Starts like a bare `class`/`def` signature rather than a usage example
pub(crate) fn is_signature_only(body: &str) -> bool {
    let body = body.trim_start();
    body.starts_with("class ") || body.starts_with("def ") || body.starts_with("async def ")
}

/// Formatting report for every document
pub fn check_format(ws: &Workspace) -> Result<Report, DocError> {
    let checker = FormatChecker::new(&ws.config.filename_pattern)?;

    #[cfg(feature = "parallel")]
    let per_doc: Vec<Vec<Finding>> = ws
        .docs
        .documents()
        .par_iter()
        .map(|doc| checker.check(doc))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_doc: Vec<Vec<Finding>> = ws.docs.documents().iter().map(|doc| checker.check(doc)).collect();

    Ok(per_doc.into_iter().flatten().collect())
}

/// Quality report: all five phases merged
pub fn check_quality(ws: &Workspace) -> Result<Report, DocError> {
    let config = &ws.config;
    let mut report = Report::new();
    let mut syntax = PythonSyntax::new()?;

    tracing::info!("[1/5] checking accuracy");
    report.extend(accuracy::check_config_examples(&ws.docs, config));
    report.extend(accuracy::check_api_examples(&ws.docs, config, &mut syntax));
    let refs = PathRefs::new(&config.path_refs)?;
    report.extend(accuracy::check_path_refs(&ws.docs, &ws.root, &refs));

    tracing::info!("[2/5] checking code examples");
    for doc in &ws.docs {
        report.extend(examples::check_code_examples(doc, &config.code_examples, &mut syntax));
    }

    tracing::info!("[3/5] checking links");
    report.merge(check_links(ws));

    tracing::info!("[4/5] checking terminology");
    let terms = Terminology::new(&config.terminology)?;
    for doc in &ws.docs {
        report.extend(terms.check(doc));
    }

    tracing::info!("[5/5] checking completeness");
    report.extend(completeness::check_completeness(&ws.docs, config));

    tracing::debug!(
        issues = report.issue_count(),
        warnings = report.warning_count(),
        "quality check finished"
    );
    Ok(report)
}

/// Run the format command
///
/// Formatting issues are advisory unless `strict` is set.
pub fn run_format(ws: &Workspace, render: RenderConfig, strict: bool) -> Result<ExitCode> {
    tracing::info!("checking formatting");
    let report = check_format(ws).context("Failed to run formatting checks")?;

    Renderer::with_config(render).render_to(&report, std::io::stdout().lock())?;

    Ok(if strict && report.has_issues() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run the quality command
pub fn run_quality(ws: &Workspace, render: RenderConfig) -> Result<ExitCode> {
    let report = check_quality(ws).context("Failed to run quality checks")?;

    Renderer::with_config(render).render_to(&report, std::io::stdout().lock())?;

    Ok(if report.has_issues() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
