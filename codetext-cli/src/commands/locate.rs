//! Locate command implementation.
//!
//! Maps a line in a generated file back to its document source.

use std::path::PathBuf;

use codetext::errors::{CodetextError, Result};
use codetext::interface::{locate_source, Context, Document, SourceLocation};

/// Options for the locate command.
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Document the file was generated from.
    pub file: PathBuf,
    /// Generated file, by root name.
    pub target: String,
    /// Line number in the generated file (1-indexed).
    pub line: usize,
    /// Print a JSON object instead of `path:line`.
    pub json: bool,
}

impl LocateOptions {
    /// Builds options from a `GENFILE:LINE` argument.
    pub fn parse(file: PathBuf, target: &str, json: bool) -> Result<Self> {
        let (name, line) = target.rsplit_once(':').ok_or_else(|| {
            CodetextError::Config(format!("expected GENFILE:LINE, got '{}'", target))
        })?;
        let line = line
            .parse()
            .map_err(|_| CodetextError::Config(format!("invalid line number '{}'", line)))?;
        Ok(Self {
            file,
            target: name.to_string(),
            line,
            json,
        })
    }
}

/// Executes the locate command.
pub fn locate(ctx: &Context, options: LocateOptions) -> Result<()> {
    let doc = Document::load(&options.file, ctx)?;
    let location = locate_source(ctx, &doc, &options.target, options.line)?;

    if options.json {
        println!("{}", render_json(&options, location.as_ref()));
        return Ok(());
    }

    match location {
        Some(loc) => println!("{}", loc),
        None => eprintln!("No source mapping for {}:{}", options.target, options.line),
    }
    Ok(())
}

fn render_json(options: &LocateOptions, location: Option<&SourceLocation>) -> String {
    let value = serde_json::json!({
        "file": options.target,
        "line": options.line,
        "source_file": location.map(|loc| loc.source_file.display().to_string()),
        "source_line": location.map(|loc| loc.source_line),
    });
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = "# Title\n\n``//output.py:\nprint('line1')\nprint('line2')\n``\n";

    #[test]
    fn test_parse_target() {
        let options = LocateOptions::parse(PathBuf::from("doc.ct"), "out/a.py:12", false).unwrap();
        assert_eq!(options.target, "out/a.py");
        assert_eq!(options.line, 12);

        assert!(LocateOptions::parse(PathBuf::from("doc.ct"), "a.py", false).is_err());
        assert!(LocateOptions::parse(PathBuf::from("doc.ct"), "a.py:x", false).is_err());
    }

    #[test]
    fn test_locate_basic() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("test.ct"), DOC).unwrap();
        let doc = Document::load(&PathBuf::from("test.ct"), &ctx).unwrap();

        // Line 1 is the header, line 2 is print('line1') on document line 4.
        let loc = locate_source(&ctx, &doc, "output.py", 2).unwrap().unwrap();
        assert_eq!(loc.source_line, 4);
        assert!(loc.source_file.ends_with("test.ct"));

        let options = LocateOptions::parse(PathBuf::from("test.ct"), "output.py:3", false).unwrap();
        locate(&ctx, options).unwrap();
    }

    #[test]
    fn test_locate_header_line() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("test.ct"), DOC).unwrap();
        let doc = Document::load(&PathBuf::from("test.ct"), &ctx).unwrap();

        let result = locate_source(&ctx, &doc, "output.py", 1).unwrap();
        assert!(result.is_none(), "Header lines should return None");
    }

    #[test]
    fn test_locate_unknown_line() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("test.ct"), DOC).unwrap();

        let options = LocateOptions::parse(PathBuf::from("test.ct"), "output.py:40", false).unwrap();
        assert!(locate(&ctx, options).is_err());
    }

    #[test]
    fn test_render_json() {
        let options = LocateOptions::parse(PathBuf::from("test.ct"), "output.py:2", true).unwrap();
        let location = SourceLocation {
            source_file: PathBuf::from("test.ct"),
            source_line: 4,
        };

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&options, Some(&location))).unwrap();
        assert_eq!(value["file"], "output.py");
        assert_eq!(value["line"], 2);
        assert_eq!(value["source_file"], "test.ct");
        assert_eq!(value["source_line"], 4);

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&options, None)).unwrap();
        assert!(value["source_line"].is_null());
    }
}
