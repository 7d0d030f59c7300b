//! Python syntax checks for code examples, backed by tree-sitter

use tree_sitter::{Node, Parser};

use crate::core::error::DocError;

/// First syntax error found in a snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub detail: String,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {}, column {})", self.detail, self.line, self.column)
    }
}

/// Reusable Python parser
pub struct PythonSyntax {
    parser: Parser,
}

impl PythonSyntax {
    pub fn new() -> Result<Self, DocError> {
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parse `source`; `None` when it is syntactically valid
    pub fn check(&mut self, source: &str) -> Option<SyntaxError> {
        let tree = self.parser.parse(source, None)?;
        let root = tree.root_node();
        if !root.has_error() {
            return None;
        }

        let node = first_error(root).unwrap_or(root);
        let pos = node.start_position();
        let detail = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            "invalid syntax".to_string()
        };

        Some(SyntaxError {
            line: pos.row + 1,
            column: pos.column + 1,
            detail,
        })
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}
