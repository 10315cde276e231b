//! Document orchestrator for tangle and provenance queries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::{CodetextError, Result};
use crate::io::{output_paths, write_outputs, OutputFile};
use crate::model::{assemble_root, build_tree, validate, NodeTree, ProvenanceMap};
use crate::readers::{scan_document, LineStore};

use super::context::Context;

/// A source document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path to the document, as given.
    pub path: PathBuf,
    /// Document text.
    pub text: String,
}

impl Document {
    /// Loads a document from a file.
    pub fn load(path: &Path, ctx: &Context) -> Result<Self> {
        let text = fs::read_to_string(ctx.resolve_path(path))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Name the generated headers point back to.
    pub fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Result of one tangle run.
#[derive(Debug, Clone)]
pub struct Tangled {
    files: Vec<OutputFile>,
    provenance: ProvenanceMap,
    lines: LineStore,
    tree: NodeTree,
}

impl Tangled {
    /// Generated files, sorted by root name.
    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    /// Returns a generated file by root name.
    pub fn file(&self, name: &str) -> Option<&OutputFile> {
        self.files.iter().find(|file| file.name == name)
    }

    pub fn provenance(&self) -> &ProvenanceMap {
        &self.provenance
    }

    /// Source lines with chunk open/close predicates.
    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    /// The resolved node tree.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Source line of a generated line, both 0-indexed.
    pub fn source_line(&self, file: &str, line: usize) -> Result<Option<usize>> {
        self.provenance.source_line(file, line)
    }

    /// Does this 0-indexed source line open a chunk?
    pub fn is_chunk_open(&self, line: usize) -> bool {
        self.lines.is_chunk_open(line)
    }

    /// Does this 0-indexed source line close a chunk?
    pub fn is_chunk_close(&self, line: usize) -> bool {
        self.lines.is_chunk_close(line)
    }

    pub fn into_files(self) -> Vec<OutputFile> {
        self.files
    }
}

/// Tangles document text into generated files.
///
/// Any structural error aborts the run. Completeness violations are
/// collected over the whole tree and reported together, before any
/// file is assembled.
pub fn tangle_text(text: &str, source_name: &str, config: &Config) -> Result<Tangled> {
    let scanned = scan_document(text);
    tracing::debug!("{} chunks in {}", scanned.chunks.len(), source_name);

    let mut tree = build_tree(&scanned.chunks)?;
    validate(&tree)?;

    let names: Vec<String> = tree.root_names().into_iter().map(String::from).collect();
    let mut provenance = ProvenanceMap::new();
    let mut files = Vec::with_capacity(names.len());
    for name in names {
        let content = assemble_root(&mut tree, &name, config, source_name, &mut provenance)?;
        files.push(OutputFile::new(name, content));
    }

    Ok(Tangled {
        files,
        provenance,
        lines: scanned.lines,
        tree,
    })
}

/// Tangles a loaded document.
pub fn tangle_document(ctx: &Context, doc: &Document) -> Result<Tangled> {
    tangle_text(&doc.text, &doc.source_name(), &ctx.config)
}

/// Writes the generated files of a document to its output directory.
///
/// With `dry_run` set nothing is written and the paths are only listed.
pub fn write_tangled(
    ctx: &Context,
    doc: &Document,
    tangled: &Tangled,
    dry_run: bool,
) -> Result<Vec<PathBuf>> {
    let dir = ctx.output_dir(&doc.path);
    if dry_run {
        return Ok(output_paths(&dir, tangled.files()));
    }
    write_outputs(&dir, tangled.files())
}

/// Result of locating a source position from a generated file position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Path to the source document.
    pub source_file: PathBuf,
    /// Line number in the source document (1-indexed).
    pub source_line: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source_file.display(), self.source_line)
    }
}

/// Maps a 1-indexed line of a generated file back to the document.
///
/// Returns `None` for generated lines that have no source, like the header.
pub fn locate_source(
    ctx: &Context,
    doc: &Document,
    file: &str,
    line: usize,
) -> Result<Option<SourceLocation>> {
    let Some(index) = line.checked_sub(1) else {
        return Err(CodetextError::Config(format!(
            "line numbers start at 1, got {} for {}",
            line, file
        )));
    };
    let tangled = tangle_document(ctx, doc)?;
    Ok(tangled
        .source_line(file, index)?
        .map(|source| SourceLocation {
            source_file: doc.path.clone(),
            source_line: source + 1,
        }))
}
