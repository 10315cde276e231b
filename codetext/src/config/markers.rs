//! Chunk syntax: openers, closers, references and path markers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Delimiter that opens and closes chunks and wraps references.
pub const CHUNK_DELIMITER: &str = "``";

/// Reference name (and chunk path) standing for an anonymous chunk.
pub const ANONYMOUS: &str = ".";

/// Chunk opening line: two backticks not followed by a third.
pub static CHUNK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^``(?:[^`].*)?$").unwrap());

/// Chunk closing line: bare backticks, optionally followed by a language hashtag.
pub static CHUNK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^``(?:\s+#\w+)?\s*$").unwrap());

/// In-chunk reference like `    ``name``` with the line's leading whitespace.
pub static REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<indent>\s*).*?``(?P<name>[^`]+)``").unwrap());

/// Trailing language hashtag on an opening line, e.g. `#py`.
pub static LANGUAGE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+#(?P<tag>\w+)\s*$").unwrap());

/// Trailing colon marking a declaration.
pub static DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*$").unwrap());

/// A reference found inside a chunk body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Leading whitespace of the reference line.
    pub indent: &'a str,
    /// Referenced chunk name, `.` for an anonymous chunk.
    pub name: &'a str,
}

impl Reference<'_> {
    /// Returns true if this references an anonymous chunk.
    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS
    }
}

/// Parses a body line as a chunk reference.
pub fn parse_reference(line: &str) -> Option<Reference<'_>> {
    let caps = REF_PATTERN.captures(line)?;
    Some(Reference {
        indent: caps.name("indent")?.as_str(),
        name: caps.name("name")?.as_str(),
    })
}

/// The path and optional language tag of a chunk opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    /// Path text, declaration colon included.
    pub path: String,
    /// Language hashtag without the `#`.
    pub language: Option<String>,
}

/// Parses a chunk opening line. Returns None if the line doesn't open a chunk.
pub fn parse_opener(line: &str) -> Option<Opener> {
    if !CHUNK_OPEN.is_match(line) {
        return None;
    }
    let rest = &line[CHUNK_DELIMITER.len()..];
    // an opener may carry a closing delimiter, drop everything from there
    let rest = rest.split(CHUNK_DELIMITER).next().unwrap_or_default();

    let language = LANGUAGE_TAG
        .captures(rest)
        .and_then(|caps| caps.name("tag"))
        .map(|tag| tag.as_str().to_string());
    let path = LANGUAGE_TAG.replace(rest, "").trim_end().to_string();

    Some(Opener { path, language })
}

/// Returns true if the line can close a chunk.
pub fn is_closer(line: &str) -> bool {
    CHUNK_CLOSE.is_match(line)
}

/// Returns true if the name is a synthesized anonymous-chunk name like `.0`.
pub fn is_ghost_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('.') && chars.next().is_some_and(|c| c != '.')
}

/// Synthesizes the name of the `index`th ghost child.
pub fn ghost_name(index: usize) -> String {
    format!("{}{}", ANONYMOUS, index)
}

/// Splits a declaration colon off a path.
pub fn split_declaration(path: &str) -> (&str, bool) {
    match DECLARATION.find(path) {
        Some(m) => (&path[..m.start()], true),
        None => (path, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener() {
        let opener = parse_opener("``//zoo.py:").unwrap();
        assert_eq!(opener.path, "//zoo.py:");
        assert_eq!(opener.language, None);

        let opener = parse_opener("``//build: #sh").unwrap();
        assert_eq!(opener.path, "//build:");
        assert_eq!(opener.language.as_deref(), Some("sh"));

        let opener = parse_opener("``").unwrap();
        assert_eq!(opener.path, "");
    }

    #[test]
    fn test_fence_is_not_an_opener() {
        assert!(parse_opener("```python").is_none());
        assert!(parse_opener("text ``x``").is_none());
    }

    #[test]
    fn test_closer() {
        assert!(is_closer("``"));
        assert!(is_closer("``  "));
        assert!(is_closer("`` #py"));
        assert!(!is_closer("``name"));
        assert!(!is_closer("```"));
    }

    #[test]
    fn test_reference() {
        let r = parse_reference("    ``body``").unwrap();
        assert_eq!(r.indent, "    ");
        assert_eq!(r.name, "body");
        assert!(!r.is_anonymous());

        let r = parse_reference("``.``").unwrap();
        assert!(r.is_anonymous());

        assert!(parse_reference("```").is_none());
        assert!(parse_reference("``````").is_none());
        assert!(parse_reference("print('no ref')").is_none());
    }

    #[test]
    fn test_reference_after_inline_backticks() {
        let r = parse_reference("  echo `x` ``y``").unwrap();
        assert_eq!(r.indent, "  ");
        assert_eq!(r.name, "y");

        assert!(parse_reference("```rust").is_none());
        assert!(parse_reference("echo `x`").is_none());
    }

    #[test]
    fn test_ghost_names() {
        assert!(is_ghost_name(".0"));
        assert!(is_ghost_name(&ghost_name(3)));
        assert!(!is_ghost_name("."));
        assert!(!is_ghost_name(".."));
        assert!(!is_ghost_name("name"));
    }

    #[test]
    fn test_split_declaration() {
        assert_eq!(split_declaration("a/b:"), ("a/b", true));
        assert_eq!(split_declaration("a/b: "), ("a/b", true));
        assert_eq!(split_declaration("a/b"), ("a/b", false));
    }
}
