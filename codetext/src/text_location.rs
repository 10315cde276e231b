//! Source locations for error reporting.
//!
//! The tree builder works with 0-indexed line indices; a `TextLocation`
//! is what ends up in messages and is always 1-indexed.

use std::fmt;
use std::path::PathBuf;

/// A line within a source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document path (if known).
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(filename: Option<PathBuf>, line: usize) -> Self {
        Self { filename, line }
    }

    /// Creates a location from a 0-indexed line index.
    pub fn from_index(index: usize) -> Self {
        Self {
            filename: None,
            line: index + 1,
        }
    }

    /// Returns a new location with updated filename.
    pub fn with_filename(mut self, filename: PathBuf) -> Self {
        self.filename = Some(filename);
        self
    }

    /// Returns the 0-indexed line index.
    pub fn index(&self) -> usize {
        self.line.saturating_sub(1)
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self {
            filename: None,
            line: 1,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}
