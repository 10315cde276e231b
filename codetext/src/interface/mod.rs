//! High-level interface for codetext operations.

mod context;
mod document;

pub use context::Context;
pub use document::{
    locate_source, tangle_document, tangle_text, write_tangled, Document, SourceLocation, Tangled,
};
