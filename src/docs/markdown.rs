//! Line-level Markdown scanning
//!
//! Not a Markdown parser: lines are classified as prose or fenced code, and
//! headings and code blocks are picked out with line-anchored patterns.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// ATX heading: 1-6 `#`, whitespace, text, optional closing `#` run
pub static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})[ \t]+(\S.*?)(?:[ \t]+#+)?[ \t]*$").expect("Invalid HEADING_RE regex")
});

/// A heading extracted in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Nesting level, 1-6
    pub level: u8,
    pub text: String,
    /// 1-based line number
    pub line: u32,
}

/// A fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First word of the info string; empty when the fence has none
    pub lang: String,
    pub body: String,
    /// 1-based line number of the opening fence
    pub line: u32,
}

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Prose,
    FenceOpen,
    FenceClose,
    Code,
}

#[derive(Debug, Clone, Copy)]
pub struct ScannedLine<'a> {
    pub number: u32,
    pub text: &'a str,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

/// Parse a fence line into (fence, info string)
fn parse_fence(line: &str) -> Option<(Fence, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }

    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }

    // run consists of single-byte chars
    let info = trimmed[len..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }

    Some((Fence { marker, len }, info))
}

fn closes(open: Fence, line: &str) -> bool {
    match parse_fence(line) {
        Some((fence, info)) => fence.marker == open.marker && fence.len >= open.len && info.is_empty(),
        None => false,
    }
}

/// Classify every line of `content`
pub fn scan_lines(content: &str) -> Vec<ScannedLine<'_>> {
    let mut lines = Vec::new();
    let mut open: Option<Fence> = None;

    for (idx, text) in content.lines().enumerate() {
        let number = idx as u32 + 1;

        let kind = match open {
            Some(fence) if closes(fence, text) => {
                open = None;
                LineKind::FenceClose
            }
            Some(_) => LineKind::Code,
            None => match parse_fence(text) {
                Some((fence, _)) => {
                    open = Some(fence);
                    LineKind::FenceOpen
                }
                None => LineKind::Prose,
            },
        };

        lines.push(ScannedLine { number, text, kind });
    }

    lines
}

/// Lines outside fenced code blocks, with their 1-based numbers
pub fn prose_lines(content: &str) -> impl Iterator<Item = (u32, &str)> {
    scan_lines(content)
        .into_iter()
        .filter(|line| line.kind == LineKind::Prose)
        .map(|line| (line.number, line.text))
}

/// Parse a single line as a heading
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str();
    Some((level, text))
}

/// Extract headings in document order (fenced code is skipped)
pub fn extract_headings(content: &str) -> Vec<Heading> {
    prose_lines(content)
        .filter_map(|(number, text)| {
            parse_heading(text).map(|(level, text)| Heading {
                level,
                text: text.to_string(),
                line: number,
            })
        })
        .collect()
}

/// Extract fenced code blocks in document order
///
/// A block left open at end of file runs to the last line.
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(CodeBlock, Vec<&str>)> = None;

    for line in scan_lines(content) {
        match line.kind {
            LineKind::FenceOpen => {
                let lang = parse_fence(line.text)
                    .and_then(|(_, info)| info.split_whitespace().next())
                    .unwrap_or_default()
                    .to_string();
                current = Some((
                    CodeBlock {
                        lang,
                        body: String::new(),
                        line: line.number,
                    },
                    Vec::new(),
                ));
            }
            LineKind::Code => {
                if let Some((_, body)) = current.as_mut() {
                    body.push(line.text);
                }
            }
            LineKind::FenceClose => {
                if let Some((mut block, body)) = current.take() {
                    block.body = body.join("\n");
                    blocks.push(block);
                }
            }
            LineKind::Prose => {}
        }
    }

    if let Some((mut block, body)) = current.take() {
        block.body = body.join("\n");
        blocks.push(block);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_levels() {
        assert_eq!(parse_heading("# Title"), Some((1, "Title")));
        assert_eq!(parse_heading("### Deep  "), Some((3, "Deep")));
        assert_eq!(parse_heading("###### Six"), Some((6, "Six")));
        assert_eq!(parse_heading("####### Seven"), None);
    }

    #[test]
    fn test_parse_heading_requires_space_and_text() {
        assert_eq!(parse_heading("#hashtag"), None);
        assert_eq!(parse_heading("#"), None);
        assert_eq!(parse_heading("#   "), None);
        assert_eq!(parse_heading(" # indented"), None);
    }

    #[test]
    fn test_parse_heading_closing_sequence() {
        assert_eq!(parse_heading("## Setup ##"), Some((2, "Setup")));
        assert_eq!(parse_heading("## C#"), Some((2, "C#")));
    }

    #[test]
    fn test_extract_headings_skips_code() {
        let content = "# Title\n\n```python\n# just a comment\n```\n\n## Usage\n";
        let headings = extract_headings(content);
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0], Heading { level: 1, text: "Title".into(), line: 1 });
        assert_eq!(headings[1].text, "Usage");
        assert_eq!(headings[1].line, 7);
    }

    #[test]
    fn test_extract_headings_keeps_duplicates() {
        let headings = extract_headings("## Setup\n## Setup\n");
        assert_eq!(headings.len(), 2);
    }

    #[test]
    fn test_scan_lines_kinds() {
        let content = "text\n```rust\nlet x = 1;\n```\nafter";
        let kinds: Vec<_> = scan_lines(content).iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Prose,
                LineKind::FenceOpen,
                LineKind::Code,
                LineKind::FenceClose,
                LineKind::Prose
            ]
        );
    }

    #[test]
    fn test_fence_close_needs_same_marker() {
        let content = "~~~\n```\nstill code\n~~~\nprose";
        let kinds: Vec<_> = scan_lines(content).iter().map(|l| l.kind).collect();
        assert_eq!(kinds[1], LineKind::Code);
        assert_eq!(kinds[3], LineKind::FenceClose);
        assert_eq!(kinds[4], LineKind::Prose);
    }

    #[test]
    fn test_fence_close_needs_enough_length() {
        let content = "````\n```\n````\n";
        let kinds: Vec<_> = scan_lines(content).iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::FenceOpen, LineKind::Code, LineKind::FenceClose]);
    }

    #[test]
    fn test_extract_code_blocks() {
        let content = "# Doc\n\n```python\nimport os\nprint(os.name)\n```\n\n```\nplain\n```\n";
        let blocks = extract_code_blocks(content);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lang, "python");
        assert_eq!(blocks[0].body, "import os\nprint(os.name)");
        assert_eq!(blocks[0].line, 3);
        assert_eq!(blocks[1].lang, "");
        assert_eq!(blocks[1].body, "plain");
    }

    #[test]
    fn test_extract_code_blocks_info_string() {
        let blocks = extract_code_blocks("``` yaml title=\"config\"\nkey: 1\n```\n");
        assert_eq!(blocks[0].lang, "yaml");
    }

    #[test]
    fn test_extract_code_blocks_unclosed() {
        let blocks = extract_code_blocks("```bash\necho hi\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "echo hi");
    }

    #[test]
    fn test_prose_lines() {
        let content = "a\n```\nb\n```\nc";
        let prose: Vec<_> = prose_lines(content).collect();
        assert_eq!(prose, vec![(1, "a"), (5, "c")]);
    }
}
