//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::language::Language;

/// Main configuration structure for codetext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for generated files, relative to the working directory.
    /// Defaults to the directory holding the source document.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Whether root files get a "don't edit" header line.
    #[serde(default = "default_true")]
    pub header: bool,

    /// Whether prose preceding a function is inserted as its comment.
    #[serde(default = "default_true")]
    pub function_comments: bool,

    /// Language configurations (overrides built-ins).
    #[serde(default)]
    pub languages: Vec<Language>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            header: default_true(),
            function_comments: default_true(),
            languages: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a language by identifier, checking custom languages first.
    pub fn find_language(&self, identifier: &str) -> Option<Language> {
        if let Some(lang) = self.languages.iter().find(|l| l.matches(identifier)) {
            return Some(lang.clone());
        }
        super::templates::find_language(identifier)
    }

    /// Resolves the language of a root file from its hashtag or extension.
    pub fn language_for_root(&self, root: &str, tag: Option<&str>) -> Option<Language> {
        if let Some(lang) = tag.and_then(|tag| self.find_language(tag)) {
            return Some(lang);
        }
        Path::new(root)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.find_language(ext))
    }

    /// Returns the output directory, if configured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}
