//! Independent whole-file writes of generated roots.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::Result;

/// Counter for unique temp file names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A generated file: a root's name and its assembled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Root name, used as the file path relative to the output directory.
    pub name: String,
    pub content: String,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Paths the files would be written to, without touching the disk.
pub fn output_paths(dir: &Path, files: &[OutputFile]) -> Vec<PathBuf> {
    files.iter().map(|file| dir.join(&file.name)).collect()
}

/// Writes every file below `dir` and returns the written paths.
///
/// Each write is independent. A failure stops the remaining writes but
/// files already written stay in place.
pub fn write_outputs(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&path, &file.content)?;
        tracing::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Writes content to a temp file next to `path`, then renames it into place.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(
        ".codetext-tmp-{}-{}",
        std::process::id(),
        counter,
    ));

    let result = write_and_rename(&temp_path, path, content);
    if result.is_err() {
        // nothing to remove if create failed
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, path)
}
