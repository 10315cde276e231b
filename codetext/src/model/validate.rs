//! Declaration and reference completeness checks over the whole tree.

use std::fmt;

use crate::errors::{CodetextError, Result};

use super::node::NodeId;
use super::tree::NodeTree;

/// What is wrong with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Referenced or walked through, but never opened with a declaring chunk.
    UndeclaredChunk,
    /// Not a root, and no chunk body references it.
    UnreferencedChunk,
}

/// A completeness violation found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Full path of the offending node.
    pub path: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::UndeclaredChunk => {
                write!(f, "chunk {} hasn't been declared", self.path)
            }
            ViolationKind::UnreferencedChunk => {
                write!(f, "chunk {} hasn't been referenced from another chunk", self.path)
            }
        }
    }
}

/// Collects every violation in the forest, roots in sorted order.
pub fn find_violations(tree: &NodeTree) -> Vec<Violation> {
    let mut violations = Vec::new();
    for name in tree.root_names() {
        if let Some(root) = tree.root(name) {
            visit(tree, root, &mut violations);
        }
    }
    violations
}

fn visit(tree: &NodeTree, id: NodeId, violations: &mut Vec<Violation>) {
    let node = &tree[id];
    if !node.declared {
        violations.push(Violation {
            kind: ViolationKind::UndeclaredChunk,
            path: tree.path_of(id),
        });
    }
    if !node.is_root() && !node.referenced {
        violations.push(Violation {
            kind: ViolationKind::UnreferencedChunk,
            path: tree.path_of(id),
        });
    }
    for child in node.children.values().chain(node.ghost_children.iter()) {
        visit(tree, *child, violations);
    }
}

/// Fails with every violation at once if any node is incomplete.
pub fn validate(tree: &NodeTree) -> Result<()> {
    let violations = find_violations(tree);
    if violations.is_empty() {
        return Ok(());
    }
    for violation in &violations {
        tracing::error!("{}", violation);
    }
    Err(CodetextError::IncompleteChunks(violations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build;
    use pretty_assertions::assert_eq;

    fn violations(text: &str) -> Vec<Violation> {
        find_violations(&build(text).unwrap())
    }

    #[test]
    fn test_complete_tree() {
        let text = "``//a.py:\n``b``\n``\n``b:\nx\n``\n";
        assert!(violations(text).is_empty());
    }

    #[test]
    fn test_unreferenced_chunk() {
        let text = "``//a.py:\nx\n``\n``b:\ny\n``\n";
        assert_eq!(
            violations(text),
            vec![Violation {
                kind: ViolationKind::UnreferencedChunk,
                path: "//a.py/b".into(),
            }]
        );
    }

    #[test]
    fn test_undeclared_chunk() {
        let text = "``//a.py:\n``b``\n``\n";
        assert_eq!(
            violations(text),
            vec![Violation {
                kind: ViolationKind::UndeclaredChunk,
                path: "//a.py/b".into(),
            }]
        );
    }

    #[test]
    fn test_unfilled_ghost_is_undeclared() {
        let text = "``//a.py:\n``.``\n``\n";
        let found = violations(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ViolationKind::UndeclaredChunk);
        assert_eq!(found[0].path, "//a.py/.0");
    }

    #[test]
    fn test_all_violations_are_collected() {
        let text = "``//a.py:\n``b``\n``\n``c:\ny\n``\n``//z.py:\n``d``\n``\n";
        let tree = build(text).unwrap();
        let err = validate(&tree).unwrap_err();

        match err {
            CodetextError::IncompleteChunks(found) => {
                assert_eq!(found.len(), 3);
                assert_eq!(found[2].path, "//z.py/d");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_message_lists_violations() {
        let text = "``//a.py:\nx\n``\n``b:\ny\n``\n";
        let tree = build(text).unwrap();
        let message = validate(&tree).unwrap_err().to_string();
        assert_eq!(
            message,
            "chunk //a.py/b hasn't been referenced from another chunk"
        );
    }
}
