//! Readers splitting a document into prose and chunks.

mod line_store;
mod scanner;
mod types;

pub use line_store::LineStore;
pub use scanner::{scan_document, ScannedDocument};
pub use types::ChunkToken;
