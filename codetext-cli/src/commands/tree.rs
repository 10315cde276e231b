//! Tree command implementation.
//!
//! Prints the resolved chunk tree of a document, a debugging aid for
//! paths and anonymous chunks.

use std::fmt::Write;
use std::path::PathBuf;

use codetext::errors::Result;
use codetext::interface::{Context, Document};
use codetext::model::{build_tree, find_violations, NodeId, NodeTree};
use codetext::readers::scan_document;

/// Options for the tree command.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Document to inspect.
    pub file: PathBuf,
}

/// Executes the tree command.
///
/// The tree is printed without validation, so incomplete documents can be
/// inspected. Violations are listed below the tree.
pub fn tree(ctx: &Context, options: TreeOptions) -> Result<()> {
    let doc = Document::load(&options.file, ctx)?;
    let tree = build_tree(&scan_document(&doc.text).chunks)?;
    print!("{}", render_tree(&tree));
    Ok(())
}

/// Renders every root with its named children first, then its ghosts.
fn render_tree(tree: &NodeTree) -> String {
    let mut out = String::new();
    for name in tree.root_names() {
        if let Some(root) = tree.root(name) {
            render_node(tree, root, 0, &mut out);
        }
    }
    for violation in find_violations(tree) {
        let _ = writeln!(out, "! {}", violation);
    }
    out
}

fn render_node(tree: &NodeTree, id: NodeId, depth: usize, out: &mut String) {
    let node = &tree[id];
    let label = if node.is_root() {
        format!("//{}", node.name)
    } else {
        node.name.clone()
    };

    let mut flags = Vec::new();
    if node.is_ghost() {
        flags.push("ghost");
    }
    if node.declared {
        flags.push("declared");
    }
    if node.referenced {
        flags.push("referenced");
    }

    let _ = writeln!(
        out,
        "{}{} [{}] {} lines",
        "  ".repeat(depth),
        label,
        flags.join(", "),
        node.lines.len()
    );

    for child in node.children.values().chain(node.ghost_children.iter()) {
        render_node(tree, *child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_tree() {
        let text = "\
``//b.py:
``helper``
``.``
``
``
y = 2
``
``//b.py/helper:
x = 1
``
``//a.py:
pass
``
";
        let tree = build_tree(&scan_document(text).chunks).unwrap();
        assert_eq!(
            render_tree(&tree),
            "\
//a.py [declared] 1 lines
//b.py [declared] 2 lines
  helper [declared, referenced] 1 lines
  .0 [ghost, declared, referenced] 1 lines
"
        );
    }

    #[test]
    fn test_tree_command() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("doc.ct"), "``//a.py:\npass\n``\n").unwrap();

        let options = TreeOptions {
            file: PathBuf::from("doc.ct"),
        };
        tree(&ctx, options).unwrap();
    }

    #[test]
    fn test_incomplete_tree_is_rendered() {
        let text = "``//a.py:\n``missing``\n``\n``//a.py/extra:\nx\n``\n";
        let tree = build_tree(&scan_document(text).chunks).unwrap();
        assert_eq!(
            render_tree(&tree),
            "\
//a.py [declared] 1 lines
  missing [referenced] 0 lines
  extra [declared] 1 lines
! chunk //a.py/missing hasn't been declared
! chunk //a.py/extra hasn't been referenced from another chunk
"
        );
    }

    #[test]
    fn test_tree_command_on_incomplete_document() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("doc.ct"), "``//a.py:\n``missing``\n``\n").unwrap();

        let options = TreeOptions {
            file: PathBuf::from("doc.ct"),
        };
        tree(&ctx, options).unwrap();
    }
}
