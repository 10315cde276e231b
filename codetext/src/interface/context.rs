//! Execution context for codetext operations.

use std::path::{Path, PathBuf};

use crate::config::{read_config, read_config_file, Config};
use crate::errors::Result;

/// Context for codetext operations: configuration and the working directory.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for relative paths.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self { config, base_dir }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context for a directory, reading `config_file` if given,
    /// else the nearest `codetext.toml` up from the directory.
    pub fn from_dir(base_dir: PathBuf, config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => read_config_file(&resolve(&base_dir, path))?,
            None => read_config(&base_dir)?,
        };
        Ok(Self::new(config, base_dir))
    }

    /// Creates a context from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        Self::from_dir(base_dir, None)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        resolve(&self.base_dir, path)
    }

    /// Directory generated files of a document go to: the configured
    /// output directory, else the directory holding the document.
    pub fn output_dir(&self, document: &Path) -> PathBuf {
        if let Some(dir) = self.config.output_dir() {
            return self.resolve_path(dir);
        }
        self.resolve_path(document)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.clone())
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
