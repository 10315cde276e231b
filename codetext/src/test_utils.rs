//! Shared test utilities.

use crate::errors::Result;
use crate::model::{build_tree, Line, NodeTree};
use crate::readers::scan_document;

/// Formats one chunk: opening line, body, closing line.
pub fn chunk(path: &str, body: &str) -> String {
    let mut out = format!("``{}\n", path);
    out.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("``\n");
    out
}

/// Formats a document from (prose, path, body) parts.
pub fn document(parts: &[(&str, &str, &str)]) -> String {
    parts
        .iter()
        .map(|(prose, path, body)| format!("{}{}", prose, chunk(path, body)))
        .collect()
}

/// Scans a document and builds its tree.
pub fn build(text: &str) -> Result<NodeTree> {
    build_tree(&scan_document(text).chunks)
}

/// The texts of stored lines.
pub fn texts(lines: &[Line]) -> Vec<&str> {
    lines.iter().map(|line| line.text.as_str()).collect()
}
