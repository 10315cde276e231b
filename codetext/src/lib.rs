//! Codetext - literate programming tangler
//!
//! Reconstructs source files from a single document that interleaves prose
//! with named, cross-referencing code chunks. Every generated line keeps a
//! mapping back to the document line it came from.
//!
//! # Example
//!
//! ```
//! use codetext::{tangle_text, Config};
//!
//! let text = "``//zoo.py:\nwelcome to the zoo\n``\n";
//! let tangled = tangle_text(text, "zoo.ct", &Config::default()).unwrap();
//!
//! let zoo = tangled.file("zoo.py").unwrap();
//! assert!(zoo.content.ends_with("welcome to the zoo\n"));
//! assert_eq!(tangled.source_line("zoo.py", 1).unwrap(), Some(1));
//! ```

pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{CodetextError, Result};
pub use interface::{tangle_text, Context, Document, Tangled};
pub use model::{NodeId, NodeTree, ProvenanceMap};
