//! Mapping from generated lines back to source document lines.

use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::{CodetextError, Result};

/// Per generated file, the source line of every generated line.
///
/// All line numbers are 0-indexed. Generated comment lines without a
/// source line map to None.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvenanceMap {
    files: IndexMap<String, Vec<Option<usize>>>,
}

impl ProvenanceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the origin of one generated line.
    pub fn insert(&mut self, file: &str, line: usize, origin: Option<usize>) {
        let lines = self.files.entry(file.to_string()).or_default();
        if lines.len() <= line {
            lines.resize(line + 1, None);
        }
        lines[line] = origin;
    }

    /// Registers a file, so an empty generated file is still known.
    pub fn add_file(&mut self, file: &str) {
        self.files.entry(file.to_string()).or_default();
    }

    /// Returns the source line for a generated line.
    ///
    /// Ok(None) means the line exists but was generated, like the header.
    pub fn source_line(&self, file: &str, line: usize) -> Result<Option<usize>> {
        self.files
            .get(file)
            .and_then(|lines| lines.get(line))
            .copied()
            .ok_or_else(|| CodetextError::NoSuchMapping {
                file: file.to_string(),
                line,
            })
    }

    /// Returns the line origins of a generated file.
    pub fn lines(&self, file: &str) -> Option<&[Option<usize>]> {
        self.files.get(file).map(Vec::as_slice)
    }

    /// Generated file names, in assembly order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
