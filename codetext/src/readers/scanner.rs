//! Chunk scanner: splits a document into prose and chunks.
//!
//! Chunks don't nest lexically. An opening line seen while outside a chunk
//! starts one; a bare closing line seen while inside a chunk ends it. The
//! same bare delimiter therefore opens an unnamed chunk when outside and
//! closes the current chunk when inside.

use crate::config::{is_closer, parse_opener};

use super::line_store::LineStore;
use super::types::ChunkToken;

/// A scanned document: its lines and its chunks in document order.
#[derive(Debug, Clone, Default)]
pub struct ScannedDocument {
    /// The document's lines with open/close predicates.
    pub lines: LineStore,
    /// Closed chunks in document order.
    pub chunks: Vec<ChunkToken>,
}

/// In-progress chunk.
struct OpenChunk {
    path: String,
    language: Option<String>,
    start_line: usize,
    body: String,
    prose: String,
}

/// Scans a document into chunk tokens.
pub fn scan_document(text: &str) -> ScannedDocument {
    let mut lines = LineStore::from_text(text);
    let mut chunks = Vec::new();

    let mut open: Option<OpenChunk> = None;
    let mut prose = String::new();
    let mut opens = Vec::new();
    let mut closes = Vec::new();

    for (i, line) in lines.lines().iter().enumerate() {
        let bare = line.strip_suffix('\n').unwrap_or(line);

        match open.as_mut() {
            None => match parse_opener(bare) {
                Some(opener) => {
                    opens.push(i);
                    open = Some(OpenChunk {
                        path: opener.path,
                        language: opener.language,
                        // the body starts on the next line
                        start_line: i + 1,
                        body: String::new(),
                        prose: std::mem::take(&mut prose),
                    });
                }
                None => prose.push_str(line),
            },
            Some(chunk) => {
                if is_closer(bare) {
                    closes.push(i);
                    if let Some(chunk) = open.take() {
                        chunks.push(ChunkToken {
                            path: chunk.path,
                            language: chunk.language,
                            body: chunk.body,
                            start_line: chunk.start_line,
                            prose: chunk.prose,
                        });
                    }
                } else {
                    chunk.body.push_str(line);
                }
            }
        }
    }

    if let Some(chunk) = open {
        tracing::warn!(
            "chunk '{}' opened at line {} is never closed, ignoring it",
            chunk.path,
            chunk.start_line
        );
    }

    for i in opens {
        lines.mark_open(i);
    }
    for i in closes {
        lines.mark_close(i);
    }

    ScannedDocument { lines, chunks }
}
