//! Verbatim document lines with chunk open/close predicates.

use std::collections::HashSet;

/// The lines of a source document, each keeping its `\n` terminator.
///
/// `\r\n` is normalized to `\n` on construction. Like a split on `\n`,
/// a document ending in a newline has a trailing empty line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
    opens: HashSet<usize>,
    closes: HashSet<usize>,
}

impl LineStore {
    /// Splits a document into lines.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .replace("\r\n", "\n")
            .split('\n')
            .map(|line| format!("{}\n", line))
            .collect();
        Self {
            lines,
            opens: HashSet::new(),
            closes: HashSet::new(),
        }
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the line at a 0-indexed position, terminator included.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Does this line open a chunk?
    pub fn is_chunk_open(&self, index: usize) -> bool {
        self.opens.contains(&index)
    }

    /// Does this line close a chunk?
    pub fn is_chunk_close(&self, index: usize) -> bool {
        self.closes.contains(&index)
    }

    pub(crate) fn mark_open(&mut self, index: usize) {
        self.opens.insert(index);
    }

    pub(crate) fn mark_close(&mut self, index: usize) {
        self.closes.insert(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_terminators() {
        let store = LineStore::from_text("a\r\nb\n");
        assert_eq!(store.lines(), &["a\n", "b\n", "\n"]);
        assert_eq!(store.line(1), Some("b\n"));
        assert_eq!(store.line(3), None);
    }

    #[test]
    fn test_predicates() {
        let mut store = LineStore::from_text("``x:\ny\n``");
        store.mark_open(0);
        store.mark_close(2);
        assert!(store.is_chunk_open(0));
        assert!(!store.is_chunk_open(1));
        assert!(store.is_chunk_close(2));
        assert!(!store.is_chunk_close(0));
    }
}
