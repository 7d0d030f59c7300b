//! docqa - A linter for Markdown documentation
//!
//! docqa provides:
//! - Formatting checks (headings, code fences, list markers, filenames)
//! - Quality checks (config/API/code examples, referenced paths, terminology, completeness)
//! - Cross-document link and anchor validation
//! - Unified report output (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod checks;
mod cli;
mod core;
mod docs;
mod links;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries the report
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    cli::run(cli)
}
