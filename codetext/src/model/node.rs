//! Nodes of the chunk tree and their arena handles.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::config::is_ghost_name;

/// Stable handle to a node in a [`NodeTree`](super::NodeTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stored line of chunk text and the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text without its line terminator.
    pub text: String,
    /// 0-indexed source line, None for generated lines.
    pub origin: Option<usize>,
    /// Inserted comment text, emitted as is and never expanded.
    pub generated: bool,
}

impl Line {
    pub fn new(text: impl Into<String>, origin: Option<usize>) -> Self {
        Self {
            text: text.into(),
            origin,
            generated: false,
        }
    }

    /// A generated line with no source origin.
    pub fn synthetic(text: impl Into<String>) -> Self {
        Self::comment(text, None)
    }

    /// A generated comment line, tagged with the prose line it quotes.
    pub fn comment(text: impl Into<String>, origin: Option<usize>) -> Self {
        Self {
            text: text.into(),
            origin,
            generated: true,
        }
    }
}

/// The accumulated identity of all chunks sharing one resolved path.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Chunk name, or a synthesized `.N` for ghosts.
    pub name: String,
    /// Owning node, None for roots.
    pub parent: Option<NodeId>,
    /// Named children by name.
    pub children: IndexMap<String, NodeId>,
    /// Anonymous children in order of their references.
    pub ghost_children: Vec<NodeId>,
    /// The ghost this node was promoted out of.
    pub ghost_parent: Option<NodeId>,
    /// Stored lines.
    pub lines: Vec<Line>,
    /// Prose preceding each appended chunk, keyed by its first line index in `lines`.
    pub prose: HashMap<usize, Vec<Line>>,
    /// Opened with a declaring chunk.
    pub declared: bool,
    /// Some other node's body references this node.
    pub referenced: bool,
    /// Index in the parent's `lines` of the reference to this node.
    pub line_in_parent: usize,
    /// Source line of each reference line in this node's body.
    pub child_at_line: HashMap<usize, NodeId>,
    /// Ordinal of the parent's chunk that references this node.
    pub chunk_in_parent: usize,
    /// Number of chunks appended to this node.
    pub chunk_count: usize,
    /// Language hashtag of the first tagged chunk appended to this node.
    pub language: Option<String>,
    /// Set once function comments have been spliced in.
    pub(crate) commented: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            ..Self::default()
        }
    }

    /// Is this an anonymous node?
    pub fn is_ghost(&self) -> bool {
        is_ghost_name(&self.name)
    }

    /// Is this a root node?
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let root = Node::new("zoo.py", None);
        assert!(root.is_root());
        assert!(!root.is_ghost());

        let ghost = Node::new(".0", Some(NodeId::from_index(0)));
        assert!(ghost.is_ghost());
        assert!(!ghost.is_root());
    }

    #[test]
    fn test_comment_lines_are_generated() {
        assert!(!Line::new("x", Some(0)).generated);
        assert!(Line::synthetic("// header").generated);

        let comment = Line::comment("// see ``helper``", Some(3));
        assert!(comment.generated);
        assert_eq!(comment.origin, Some(3));
    }

    #[test]
    fn test_node_id_roundtrip() {
        let id = NodeId::from_index(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "#7");
    }
}
