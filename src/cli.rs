//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::config::Config;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::docs::workspace::Workspace;

/// docqa - a linter for a directory of Markdown documentation.
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(
    author,
    version,
    about,
    long_about = r#"docqa checks a directory of Markdown documents for formatting and quality problems.

Every command prints a report of findings, grouped by document, split into
issues (exit code 1 for quality/links) and warnings (advisory).

Output formats:
- text: colored human-readable report (default)
- jsonl: one JSON finding per line
- json: {"issues": {...}, "warnings": {...}}
- md: Markdown sections

Examples:
    docqa format
    docqa format --strict
    docqa quality --format json
    docqa links --docs-dir manual
    docqa anchors --format json --pretty
"#
)]
pub struct Cli {
    /// Project root directory.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Project root directory (defaults to the current directory).\n\n\
Paths referenced from the documents (e.g. `src/app.py`) are resolved against it,\n\
and `docqa.toml` is looked up here when --config is not given."
    )]
    pub root: PathBuf,

    /// Documentation directory (relative to ROOT).
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        long_help = "Directory holding the Markdown documents. Overrides `docs_dir` from the\n\
config file. Relative paths are resolved against ROOT. Only files directly inside\n\
this directory are checked."
    )]
    pub docs_dir: Option<PathBuf>,

    /// Configuration file (TOML).
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        long_help = "Explicit configuration file. When omitted, ROOT/docqa.toml is used if it\n\
exists, otherwise built-in defaults apply."
    )]
    pub config: Option<PathBuf>,

    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the report format.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)\n\n\
Tip: Prefer json or jsonl when feeding results into other tools."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on text/md formats."
    )]
    pub pretty: bool,

    /// Include hidden (dot) files.
    #[arg(
        long,
        global = true,
        long_help = "Include documents whose names start with a dot. Applies to every check,\n\
including the anchor index used for link validation."
    )]
    pub hidden: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (warnings and errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log warnings and errors to stderr. The report itself is still printed\n\
to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (debug logging).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug logging on stderr. RUST_LOG, when set, takes precedence over\n\
both --quiet and --verbose."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check document formatting.
    #[command(
        long_about = "Check every document for formatting problems: filename convention, exactly\n\
one top-level heading, a language on every code fence, '-' as list marker and a\n\
trailing newline.\n\n\
Formatting issues are advisory: the exit code is 0 unless --strict is given.\n\n\
Examples:\n\
  docqa format\n\
  docqa format --strict --no-color\n"
    )]
    Format {
        /// Exit with status 1 when any formatting issue is found.
        #[arg(
            long,
            long_help = "Exit with status 1 when any formatting issue is found. Intended for CI."
        )]
        strict: bool,
    },

    /// Check documentation quality.
    #[command(
        long_about = "Run all quality checks in order:\n\
  1. accuracy (config examples, API examples, referenced paths)\n\
  2. code examples (Python syntax)\n\
  3. links (files and anchors across documents)\n\
  4. terminology consistency\n\
  5. completeness (required documents and mentions)\n\n\
Exits with status 1 when any issue is found; warnings never fail the run.\n\n\
Examples:\n\
  docqa quality\n\
  docqa quality --format jsonl\n"
    )]
    Quality,

    /// Validate internal links and anchors only.
    #[command(
        long_about = "Build the anchor index for every document, then validate each relative and\n\
same-document link against it. A link to a missing file is an issue; a link to a\n\
missing anchor is a warning.\n\n\
Examples:\n\
  docqa links\n\
  docqa links --hidden\n"
    )]
    Links,

    /// Print the anchor index.
    #[command(
        long_about = "Print every document together with the anchors its headings produce.\n\n\
Examples:\n\
  docqa anchors\n\
  docqa anchors --format json --pretty\n"
    )]
    Anchors,
}

/// Execute CLI command
pub fn run(cli: Cli) -> Result<ExitCode> {
    let format: OutputFormat = cli.format.parse().unwrap_or_else(|err| {
        tracing::warn!("{}, falling back to text", err);
        OutputFormat::default()
    });
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    let mut config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(&root),
    }
    .context("Failed to load configuration")?;
    config.include_hidden |= cli.hidden;

    let ws = Workspace::open(&root, config, cli.docs_dir.as_deref())
        .context("Failed to load documentation")?;

    match cli.command {
        Commands::Format { strict } => crate::checks::run_format(&ws, render_config, strict),
        Commands::Quality => crate::checks::run_quality(&ws, render_config),
        Commands::Links => crate::links::run_links(&ws, render_config),
        Commands::Anchors => {
            crate::links::run_anchors(&ws, render_config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
