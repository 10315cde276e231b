//! Error types for the codetext tangler.

use thiserror::Error;

use crate::model::Violation;
use crate::text_location::TextLocation;

/// Main error type for codetext operations.
#[derive(Error, Debug)]
pub enum CodetextError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("{location}: there's no file to attach '{path}' to, should it start with '//'?")]
    MissingAttachmentPoint { location: TextLocation, path: String },

    #[error("{location}: chunk {path} has already been declared, maybe drop the colon ':'")]
    RedeclaredChunk { location: TextLocation, path: String },

    #[error("{location}: chunk {path} needs to be declared with ':' before text is appended to it")]
    UndeclaredAppend { location: TextLocation, path: String },

    #[error("{location}: '{step}' names an anonymous chunk, which can't be reached by path")]
    IllegalGhostAccess { location: TextLocation, step: String },

    #[error("{location}: only one anonymous chunk reference per chunk allowed")]
    MultipleGhostsPerChunk { location: TextLocation },

    #[error("{location}: found {found} nodes named {name} in sub-tree of {under}, expected exactly one")]
    AmbiguousOrMissingSubtreeReference {
        location: TextLocation,
        name: String,
        under: String,
        found: usize,
    },

    #[error("{location}: path '{path}' steps above the root {root}")]
    PathEscapesRoot {
        location: TextLocation,
        path: String,
        root: String,
    },

    #[error("chunk {parent} references {name}, but no such child exists")]
    UnresolvedReference { parent: String, name: String },

    #[error("{}", format_violations(.0))]
    IncompleteChunks(Vec<Violation>),

    /// `line` is the 0-indexed generated line that was asked for.
    #[error("there is no line {} in {}", .line + 1, .file)]
    NoSuchMapping { file: String, line: usize },
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for codetext operations.
pub type Result<T> = std::result::Result<T, CodetextError>;
