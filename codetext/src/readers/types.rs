//! Type definitions for readers.

use crate::text_location::TextLocation;

/// A closed chunk, as handed from the scanner to the node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkToken {
    /// Path text from the opening line, declaration colon included.
    pub path: String,
    /// Language hashtag of the opening line.
    pub language: Option<String>,
    /// Body lines, each with its `\n`.
    pub body: String,
    /// 0-indexed source line of the first body line.
    pub start_line: usize,
    /// Prose between the previous chunk close and this chunk's opening line.
    pub prose: String,
}

impl ChunkToken {
    /// Creates a chunk token.
    pub fn new(path: impl Into<String>, body: impl Into<String>, start_line: usize) -> Self {
        Self {
            path: path.into(),
            language: None,
            body: body.into(),
            start_line,
            prose: String::new(),
        }
    }

    /// Sets the preceding prose.
    pub fn with_prose(mut self, prose: impl Into<String>) -> Self {
        self.prose = prose.into();
        self
    }

    /// Returns the location of the chunk's opening line.
    pub fn location(&self) -> TextLocation {
        TextLocation::from_index(self.start_line.saturating_sub(1))
    }

    /// Returns the number of body lines.
    pub fn body_len(&self) -> usize {
        self.body.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_token() {
        let token = ChunkToken::new("//zoo.py:", "a\nb\n", 3).with_prose("intro\n");

        assert_eq!(token.location().line, 3);
        assert_eq!(token.body_len(), 2);
        assert_eq!(token.prose, "intro\n");
    }
}
