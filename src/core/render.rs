//! Renderer module
//!
//! Renders a Report to different output formats: text, jsonl, json, md

use colored::Colorize;
use std::io::Write;

use crate::core::model::{Finding, Report, Severity};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, report: &Report, mut writer: W) -> std::io::Result<()> {
        let output = self.render(report);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render as a human-readable report
    fn render_text(&self, report: &Report) -> String {
        let mut output = String::new();
        let issues = report.issue_count();
        let warnings = report.warning_count();

        if issues > 0 {
            output.push_str(&format!(
                "{}\n\n",
                format!("✗ Found {} issue(s):", issues).red().bold()
            ));
            for (file, findings) in &report.issues {
                output.push_str(&format!("{}\n", file.bold()));
                for finding in findings {
                    output.push_str(&format!("   {} {}\n", "✗".red(), describe(finding)));
                }
                output.push('\n');
            }
        } else {
            output.push_str(&format!("{}\n\n", "✓ No issues found".green()));
        }

        if warnings > 0 {
            output.push_str(&format!(
                "{}\n\n",
                format!("⚠ Found {} warning(s):", warnings).yellow().bold()
            ));
            for (file, findings) in &report.warnings {
                output.push_str(&format!("{}\n", file.bold()));
                for finding in findings {
                    output.push_str(&format!("   {} {}\n", "⚠".yellow(), describe(finding)));
                }
                output.push('\n');
            }
        } else {
            output.push_str(&format!("{}\n\n", "✓ No warnings".green()));
        }

        output.push_str(&format!(
            "Total: {} issue(s), {} warning(s)",
            issues, warnings
        ));
        output
    }

    /// Render as JSON Lines (one finding per line)
    fn render_jsonl(&self, report: &Report) -> String {
        report
            .findings()
            .filter_map(|finding| {
                if self.config.pretty {
                    serde_json::to_string_pretty(finding).ok()
                } else {
                    serde_json::to_string(finding).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON object: {"issues": {...}, "warnings": {...}}
    fn render_json(&self, report: &Report) -> String {
        let fallback = || r#"{"issues":{},"warnings":{}}"#.to_string();
        if self.config.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| fallback())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| fallback())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, report: &Report) -> String {
        let mut output = String::new();

        for (title, severity) in [("Issues", Severity::Issue), ("Warnings", Severity::Warning)] {
            let groups = match severity {
                Severity::Issue => &report.issues,
                Severity::Warning => &report.warnings,
            };
            if groups.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", title));
            for (file, findings) in groups {
                output.push_str(&format!("### `{}`\n\n", file));
                for finding in findings {
                    output.push_str(&format!("- **{}**: ", finding.code));
                    if let Some(line) = finding.line {
                        output.push_str(&format!("(line {}) ", line));
                    }
                    output.push_str(&finding.message);
                    output.push('\n');
                }
                output.push('\n');
            }
        }

        output
    }
}

fn describe(finding: &Finding) -> String {
    match finding.line {
        Some(line) => format!("[{}] line {}: {}", finding.code, line, finding.message),
        None => format!("[{}] {}", finding.code, finding.message),
    }
}
