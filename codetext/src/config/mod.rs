//! Configuration loading and management.

mod config_data;
mod language;
mod markers;
mod templates;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::Config;
pub use language::{BlockComment, Comment, Language, Placement};
pub use markers::{
    ghost_name, is_closer, is_ghost_name, parse_opener, parse_reference, split_declaration,
    Opener, Reference, ANONYMOUS, CHUNK_CLOSE, CHUNK_DELIMITER, CHUNK_OPEN, REF_PATTERN,
};
pub use templates::{builtin_languages, find_language};

use crate::errors::Result;

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["codetext.toml", ".codetext.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file, or JSON if the file ends in `.json`.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };
    tracing::debug!("read configuration from {}", path.display());
    Ok(config)
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => read_config_file(&path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("codetext.toml");
        fs::write(&config_path, "header = false").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_file_parent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("codetext.toml");
        fs::write(&config_path, "header = false").unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let found = find_config_file(&subdir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_read_config_default() {
        let dir = tempdir().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert!(config.header);
        assert!(config.languages.is_empty());
    }

    #[test]
    fn test_read_config_with_languages() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("codetext.toml");

        let toml_content = r#"
output_dir = "gen"
function_comments = false

[[languages]]
name = "mylang"
identifiers = ["ml", "myl"]
function_pattern = '^proc (?P<name>\w+)'

[languages.comment]
line = ";;"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.output_dir(), Some(Path::new("gen")));
        assert!(!config.function_comments);
        assert_eq!(config.languages.len(), 1);

        let lang = config.find_language("myl").unwrap();
        assert_eq!(lang.name, "mylang");
        assert_eq!(lang.comment.line_prefix(), Some(";;"));
    }

    #[test]
    fn test_read_config_json() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("languages.json");
        fs::write(
            &config_path,
            r##"{"languages": [{"name": "awk", "identifiers": ["awk"], "comment": {"line": "#"}}]}"##,
        )
        .unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.find_language("awk").unwrap().name, "awk");
    }

    #[test]
    fn test_read_config_invalid() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("codetext.toml");
        fs::write(&config_path, "header = [").unwrap();
        assert!(read_config_file(&config_path).is_err());
    }
}
