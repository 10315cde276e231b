//! Per-language configuration: comment markers and function patterns.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CodetextError, Result};

/// Block comment markers, e.g. `/*`, ` *`, `*/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockComment {
    /// Opening marker.
    pub open: String,
    /// Marker prefixed to each line inside the block (may be empty).
    #[serde(default)]
    pub during: String,
    /// Closing marker.
    pub close: String,
}

/// Comment style configuration for a language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Line comment prefix, e.g. "//" or "#".
    #[serde(default)]
    pub line: Option<String>,
    /// Block comment markers, used for function comments when set.
    #[serde(default)]
    pub block: Option<BlockComment>,
    /// Extra indent of function comments relative to the function line.
    #[serde(default)]
    pub indent: String,
}

impl Comment {
    /// Creates a line comment style.
    pub fn line(prefix: impl Into<String>) -> Self {
        Self {
            line: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Adds block comment markers.
    pub fn with_block(
        mut self,
        open: impl Into<String>,
        during: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.block = Some(BlockComment {
            open: open.into(),
            during: during.into(),
            close: close.into(),
        });
        self
    }

    /// Sets the comment indent.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Returns the line comment prefix, if the language has one.
    pub fn line_prefix(&self) -> Option<&str> {
        self.line.as_deref().filter(|prefix| !prefix.is_empty())
    }

    /// Wraps text in a line comment.
    pub fn wrap(&self, text: &str) -> Option<String> {
        self.line_prefix().map(|prefix| format!("{} {}", prefix, text))
    }
}

/// Where function comments go relative to the declaration line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Comment lines precede the function declaration.
    #[default]
    Before,
    /// Comment lines follow the function declaration (docstring style).
    After,
}

/// Language configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language identifier (e.g., "python", "go")
    pub name: String,

    /// File extensions and aliases for this language
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// Comment style
    #[serde(default)]
    pub comment: Comment,

    /// Pattern recognizing a function declaration, with a `name` capture group.
    #[serde(default)]
    pub function_pattern: Option<String>,

    /// Placement of function comments.
    #[serde(default)]
    pub placement: Placement,
}

impl Language {
    /// Creates a new Language configuration.
    pub fn new(name: impl Into<String>, comment: Comment) -> Self {
        Self {
            name: name.into(),
            identifiers: Vec::new(),
            comment,
            function_pattern: None,
            placement: Placement::Before,
        }
    }

    /// Adds file extensions/identifiers.
    pub fn with_identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.identifiers = identifiers;
        self
    }

    /// Sets the function declaration pattern.
    pub fn with_function(mut self, pattern: impl Into<String>, placement: Placement) -> Self {
        self.function_pattern = Some(pattern.into());
        self.placement = placement;
        self
    }

    /// Checks if this language matches a given identifier.
    pub fn matches(&self, identifier: &str) -> bool {
        self.name == identifier || self.identifiers.iter().any(|id| id == identifier)
    }

    /// Compiles the function pattern.
    ///
    /// A pattern without a `name` group can't tell which prose belongs to
    /// the function and is rejected.
    pub fn function_regex(&self) -> Result<Option<Regex>> {
        let Some(pattern) = &self.function_pattern else {
            return Ok(None);
        };
        let regex = Regex::new(pattern)?;
        if !regex.capture_names().flatten().any(|name| name == "name") {
            return Err(CodetextError::Config(format!(
                "function pattern of language {} has no 'name' group: {}",
                self.name, pattern
            )));
        }
        Ok(Some(regex))
    }
}
