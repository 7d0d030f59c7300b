//! Golden tests for docqa
//!
//! These tests run every command over the fixture project in
//! `tests/fixtures/sample_docs` and pin the resulting reports:
//! - which findings each check produces, per document
//! - finding codes, severities and line numbers
//! - the anchor index

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample project
fn sample_project() -> PathBuf {
    fixtures_dir().join("sample_docs")
}

/// Create a command for running the docqa binary against the sample project
fn docqa_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docqa"));
    cmd.arg("--root").arg(sample_project()).arg("--quiet");
    cmd
}

/// Run with `--format json` and parse stdout
fn run_json(args: &[&str]) -> (Option<i32>, Value) {
    let output = docqa_cmd()
        .args(["--format", "json"])
        .args(args)
        .output()
        .expect("failed to execute");
    let report = serde_json::from_slice(&output.stdout).expect("valid json report");
    (output.status.code(), report)
}

/// `(code, line)` pairs of one document's findings
fn codes(report: &Value, severity: &str, file: &str) -> Vec<(String, Option<u64>)> {
    report[severity][file]
        .as_array()
        .map(|findings| {
            findings
                .iter()
                .map(|f| {
                    (
                        f["code"].as_str().unwrap().to_string(),
                        f.get("line").and_then(Value::as_u64),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn files(report: &Value, severity: &str) -> Vec<String> {
    report[severity]
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn pair(code: &str, line: Option<u64>) -> (String, Option<u64>) {
    (code.to_string(), line)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Format Tests ====================

    #[test]
    fn golden_format_report() {
        let (status, report) = run_json(&["format"]);
        assert_eq!(status, Some(0), "format is advisory without --strict");

        assert_eq!(
            files(&report, "issues"),
            vec!["Release-Notes.md", "faq.md", "getting_started.md"]
        );
        assert_eq!(
            codes(&report, "issues", "Release-Notes.md"),
            vec![pair("FILENAME_CONVENTION", None), pair("NO_TRAILING_NEWLINE", None)]
        );
        assert_eq!(
            codes(&report, "issues", "faq.md"),
            vec![pair("CODE_BLOCK_NO_LANG", Some(9))]
        );
        assert_eq!(
            codes(&report, "issues", "getting_started.md"),
            vec![pair("LIST_MARKER", Some(20))]
        );
        assert!(files(&report, "warnings").is_empty());
    }

    #[test]
    fn golden_format_strict_fails() {
        docqa_cmd().args(["format", "--strict"]).assert().failure().code(1);
    }

    // ==================== Quality Tests ====================

    #[test]
    fn golden_quality_issues() {
        let (status, report) = run_json(&["quality"]);
        assert_eq!(status, Some(1));

        assert_eq!(
            files(&report, "issues"),
            vec!["completeness", "examples.md", "getting_started.md"]
        );
        assert_eq!(
            codes(&report, "issues", "getting_started.md"),
            vec![
                pair("CONFIG_MISSING_KEY", Some(12)),
                pair("CONFIG_MISSING_KEY", Some(12)),
                pair("LINK_MISSING_FILE", Some(18)),
            ]
        );
        assert_eq!(
            codes(&report, "issues", "examples.md"),
            vec![pair("CODE_SYNTAX", Some(5))]
        );
        assert_eq!(
            report["issues"]["completeness"][0]["message"],
            "missing required document: architecture.md (system architecture)"
        );
    }

    #[test]
    fn golden_quality_warnings() {
        let (_, report) = run_json(&["quality"]);

        assert_eq!(
            files(&report, "warnings"),
            vec!["examples.md", "faq.md", "getting_started.md"]
        );
        assert_eq!(
            codes(&report, "warnings", "faq.md"),
            vec![pair("ANCHOR_MISSING", Some(7)), pair("TERM_MIXED", None)]
        );
        assert_eq!(
            codes(&report, "warnings", "getting_started.md"),
            vec![pair("PATH_NOT_FOUND", Some(8))]
        );
        assert_eq!(
            report["warnings"]["examples.md"][0]["message"],
            "missing example for Script2Video"
        );
    }

    #[test]
    fn golden_quality_messages() {
        let (_, report) = run_json(&["quality"]);

        let messages: Vec<&str> = report["issues"]["getting_started.md"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["message"].as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "config example #1: `chat_model` is missing `init_args`",
                "config example #1: `chat_model` is missing `model`",
                "link points to nonexistent file: setup.md",
            ]
        );
        assert_eq!(
            report["warnings"]["getting_started.md"][0]["message"],
            "referenced path may not exist: configs/missing.yaml"
        );
        assert!(report["issues"]["examples.md"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("code example #1 has a syntax error"));
    }

    // ==================== Links Tests ====================

    #[test]
    fn golden_links_only() {
        let (status, report) = run_json(&["links"]);
        assert_eq!(status, Some(1));

        assert_eq!(files(&report, "issues"), vec!["getting_started.md"]);
        assert_eq!(
            codes(&report, "issues", "getting_started.md"),
            vec![pair("LINK_MISSING_FILE", Some(18))]
        );
        assert_eq!(files(&report, "warnings"), vec!["faq.md"]);
        assert_eq!(
            report["warnings"]["faq.md"][0]["message"],
            "anchor link may not exist: #missing-section"
        );
    }

    // ==================== Anchors Tests ====================

    #[test]
    fn golden_anchor_index() {
        let (status, index) = run_json(&["anchors"]);
        assert_eq!(status, Some(0));
        assert_eq!(
            index,
            json!({
                "Release-Notes.md": ["release-notes"],
                "examples.md": ["examples", "idea2video"],
                "faq.md": ["common-errors", "faq"],
                "getting_started.md": ["configuration", "getting-started", "installation"],
            })
        );
    }

    #[test]
    fn golden_anchor_index_hidden() {
        let (_, index) = run_json(&["anchors", "--hidden"]);
        assert_eq!(index[".draft.md"], json!(["draft", "secret"]));
        assert_eq!(index.as_object().unwrap().len(), 5);
    }

    // ==================== Output Format Tests ====================

    #[test]
    fn golden_jsonl_one_finding_per_line() {
        let output = docqa_cmd()
            .args(["--format", "jsonl", "links"])
            .output()
            .expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);
        let findings: Vec<Value> = stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("valid jsonl line"))
            .collect();

        assert_eq!(findings.len(), 2);
        // issues first, then warnings
        assert_eq!(findings[0]["severity"], "issue");
        assert_eq!(findings[0]["file"], "getting_started.md");
        assert_eq!(findings[1]["severity"], "warning");
        assert_eq!(findings[1]["line"], 7);
    }

    #[test]
    fn golden_text_report() {
        let output = docqa_cmd()
            .args(["--no-color", "links"])
            .output()
            .expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.contains("✗ Found 1 issue(s):"));
        assert!(stdout.contains(
            "   ✗ [LINK_MISSING_FILE] line 18: link points to nonexistent file: setup.md"
        ));
        assert!(stdout.contains("⚠ Found 1 warning(s):"));
        assert!(stdout.trim_end().ends_with("Total: 1 issue(s), 1 warning(s)"));
    }

    #[test]
    fn golden_markdown_report() {
        let output = docqa_cmd()
            .args(["--format", "md", "links"])
            .output()
            .expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.starts_with("## Issues\n\n### `getting_started.md`\n"));
        assert!(stdout.contains("- **ANCHOR_MISSING**: (line 7) anchor link may not exist: #missing-section"));
    }
}
