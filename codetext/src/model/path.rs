//! Chunk path syntax.
//!
//! ```text
//! name          child of the current node
//! ../name       sibling
//! /name         from the root of the current tree
//! //root/name   from a named root, created if new
//! */name        the unique node called `name` below here
//! *name         same as `*/name`
//! ```

use std::fmt;

use crate::config::is_ghost_name;
use crate::errors::{CodetextError, Result};
use crate::text_location::TextLocation;

const SEPARATOR: char = '/';
const SEARCH: &str = "*";

/// Where a path starts walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// The current node.
    Current,
    /// The root of the current node's tree.
    TreeRoot,
    /// A root selected by name.
    NamedRoot(String),
}

/// One step of a path walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `.` or an empty segment.
    Stay,
    /// `..`
    Up,
    /// A named child, created if absent.
    Child(String),
    /// Breadth-first search for a unique node.
    Search(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Stay => write!(f, "."),
            Step::Up => write!(f, ".."),
            Step::Child(name) => write!(f, "{}", name),
            Step::Search(name) => write!(f, "*/{}", name),
        }
    }
}

/// A parsed chunk path, declaration marker already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPath {
    pub anchor: Anchor,
    pub steps: Vec<Step>,
}

impl ChunkPath {
    /// Parses a path. Naming a ghost in any segment is an error.
    pub fn parse(path: &str, location: &TextLocation) -> Result<Self> {
        let (anchor, rest) = if let Some(rest) = path.strip_prefix("//") {
            let rest = rest.trim_matches(SEPARATOR);
            let (root, rest) = rest.split_once(SEPARATOR).unwrap_or((rest, ""));
            if root.is_empty() {
                return Err(CodetextError::MissingAttachmentPoint {
                    location: location.clone(),
                    path: path.to_string(),
                });
            }
            check_segment(root, location)?;
            (Anchor::NamedRoot(root.to_string()), rest)
        } else if path.starts_with(SEPARATOR) {
            (Anchor::TreeRoot, path)
        } else {
            (Anchor::Current, path)
        };

        let mut steps = Vec::new();
        let mut search = false;
        for segment in rest.trim_matches(SEPARATOR).split(SEPARATOR) {
            if segment == SEARCH {
                search = true;
                continue;
            }
            check_segment(segment, location)?;
            if search {
                search = false;
                steps.push(Step::Search(segment.to_string()));
                continue;
            }
            let step = match segment {
                "" | "." => Step::Stay,
                ".." => Step::Up,
                _ => match segment.strip_prefix(SEARCH) {
                    Some(name) => Step::Search(name.to_string()),
                    None => Step::Child(segment.to_string()),
                },
            };
            steps.push(step);
        }

        Ok(Self { anchor, steps })
    }

    /// Does this path start from a named root?
    pub fn is_from_root(&self) -> bool {
        matches!(self.anchor, Anchor::NamedRoot(_))
    }
}

fn check_segment(segment: &str, location: &TextLocation) -> Result<()> {
    let name = segment.strip_prefix(SEARCH).unwrap_or(segment);
    if is_ghost_name(name) {
        return Err(CodetextError::IllegalGhostAccess {
            location: location.clone(),
            step: segment.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(path: &str) -> Result<ChunkPath> {
        ChunkPath::parse(path, &TextLocation::default())
    }

    #[test]
    fn test_relative() {
        let path = parse("a/../b").unwrap();
        assert_eq!(path.anchor, Anchor::Current);
        assert_eq!(
            path.steps,
            vec![Step::Child("a".into()), Step::Up, Step::Child("b".into())]
        );
    }

    #[test]
    fn test_named_root() {
        let path = parse("//zoo.py").unwrap();
        assert_eq!(path.anchor, Anchor::NamedRoot("zoo.py".into()));
        assert_eq!(path.steps, vec![Step::Stay]);
        assert!(path.is_from_root());

        let path = parse("//zoo.py/animals/lion").unwrap();
        assert_eq!(
            path.steps,
            vec![Step::Child("animals".into()), Step::Child("lion".into())]
        );
    }

    #[test]
    fn test_tree_root() {
        let path = parse("/animals").unwrap();
        assert_eq!(path.anchor, Anchor::TreeRoot);
        assert_eq!(path.steps, vec![Step::Child("animals".into())]);
    }

    #[test]
    fn test_search() {
        let path = parse("//f.py/*/helper").unwrap();
        assert_eq!(path.steps, vec![Step::Search("helper".into())]);

        let path = parse("*helper/inner").unwrap();
        assert_eq!(
            path.steps,
            vec![Step::Search("helper".into()), Step::Child("inner".into())]
        );
    }

    #[test]
    fn test_ghost_segment_is_rejected() {
        assert!(matches!(
            parse("a/.0/b"),
            Err(CodetextError::IllegalGhostAccess { step, .. }) if step == ".0"
        ));
        assert!(matches!(
            parse("*/.1"),
            Err(CodetextError::IllegalGhostAccess { .. })
        ));
    }

    #[test]
    fn test_empty_root_name() {
        assert!(matches!(
            parse("//"),
            Err(CodetextError::MissingAttachmentPoint { .. })
        ));
    }
}
