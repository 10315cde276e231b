//! Recursive assembly of a root into generated text.

use crate::config::{parse_reference, Config, Language};
use crate::errors::{CodetextError, Result};

use super::comments::insert_comments;
use super::node::NodeId;
use super::provenance::ProvenanceMap;
use super::tree::NodeTree;

/// Expands nodes into text, recording where each emitted line came from.
pub struct Assembler<'a> {
    tree: &'a mut NodeTree,
    config: &'a Config,
    language: Option<&'a Language>,
    source_name: &'a str,
    provenance: &'a mut ProvenanceMap,
}

impl<'a> Assembler<'a> {
    pub fn new(
        tree: &'a mut NodeTree,
        config: &'a Config,
        language: Option<&'a Language>,
        source_name: &'a str,
        provenance: &'a mut ProvenanceMap,
    ) -> Self {
        Self {
            tree,
            config,
            language,
            source_name,
            provenance,
        }
    }

    /// Assembles a node, filling its indent up to `leading_indent`.
    ///
    /// Lines already indented in the source keep that indent; only the
    /// difference is added. `line` is the next 0-indexed output line of
    /// `root`, the returned number the one after this node's last line.
    pub fn assemble(
        &mut self,
        id: NodeId,
        leading_indent: &str,
        root: &str,
        line: usize,
    ) -> Result<(String, usize)> {
        let present = self.tree[id]
            .lines
            .first()
            .map(|first| leading_whitespace(&first.text).chars().count())
            .unwrap_or(0);
        let wanted = leading_indent.chars().count();
        let added: String = leading_indent
            .chars()
            .take(wanted.saturating_sub(present))
            .collect();

        insert_comments(self.tree, id, self.language, self.config, self.source_name)?;

        let lines = self.tree[id].lines.clone();
        let ghosts = self.tree[id].ghost_children.clone();
        let mut ghosts = ghosts.into_iter();

        let mut out = String::new();
        let mut line = line;
        for stored in &lines {
            let reference = if stored.generated {
                None
            } else {
                parse_reference(&stored.text)
            };
            match reference {
                Some(reference) => {
                    let child = if reference.is_anonymous() {
                        ghosts.next()
                    } else {
                        self.tree.named_child(id, reference.name)
                    };
                    let child = child.ok_or_else(|| CodetextError::UnresolvedReference {
                        parent: self.tree.path_of(id),
                        name: reference.name.to_string(),
                    })?;
                    let indent = format!("{}{}", reference.indent, added);
                    let (text, next) = self.assemble(child, &indent, root, line)?;
                    out.push_str(&text);
                    line = next;
                }
                None => {
                    out.push_str(&added);
                    out.push_str(&stored.text);
                    out.push('\n');
                    self.provenance.insert(root, line, stored.origin);
                    line += 1;
                }
            }
        }
        Ok((out, line))
    }
}

fn leading_whitespace(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}

/// Assembles one root with its resolved language.
pub fn assemble_root(
    tree: &mut NodeTree,
    root: &str,
    config: &Config,
    source_name: &str,
    provenance: &mut ProvenanceMap,
) -> Result<String> {
    let id = tree
        .root(root)
        .ok_or_else(|| CodetextError::Config(format!("there is no root {}", root)))?;

    let language = config.language_for_root(root, tree[id].language.as_deref());
    match &language {
        Some(language) => tracing::debug!("{} is {}", root, language.name),
        None => tracing::warn!("unknown language for {}, no comments inserted", root),
    }

    provenance.add_file(root);
    let mut assembler = Assembler::new(tree, config, language.as_ref(), source_name, provenance);
    let (text, _) = assembler.assemble(id, "", root, 0)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build;
    use pretty_assertions::assert_eq;

    fn assemble_text(text: &str, root: &str) -> (String, ProvenanceMap) {
        let mut tree = build(text).unwrap();
        let config = Config {
            header: false,
            ..Config::default()
        };
        let mut provenance = ProvenanceMap::new();
        let out = assemble_root(&mut tree, root, &config, "doc.ct", &mut provenance).unwrap();
        (out, provenance)
    }

    #[test]
    fn test_indentation_is_filled_up() {
        let text = "\
``//a.py:
def f():
    ``body``
``
``body:
x = 1
if x:
    y = 2
``
";
        let (out, _) = assemble_text(text, "a.py");
        assert_eq!(out, "def f():\n    x = 1\n    if x:\n        y = 2\n");
    }

    #[test]
    fn test_partially_indented_child() {
        let text = "\
``//a.py:
class A:
        ``body``
``
``body:
    x = 1
    y = 2
``
";
        let (out, _) = assemble_text(text, "a.py");
        assert_eq!(out, "class A:\n        x = 1\n        y = 2\n");
    }

    #[test]
    fn test_over_indented_child_keeps_its_indent() {
        let text = "``//a.py:\n  ``body``\n``\n``body:\n    x\n``\n";
        let (out, _) = assemble_text(text, "a.py");
        assert_eq!(out, "    x\n");
    }

    #[test]
    fn test_nested_indentation() {
        let text = "\
``//a.py:
class A:
    ``methods``
``
``methods:
def f(self):
    ``body``
``
``body:
return 1
``
";
        let (out, _) = assemble_text(text, "a.py");
        assert_eq!(out, "class A:\n    def f(self):\n        return 1\n");
    }

    #[test]
    fn test_ghosts_in_order() {
        let text = "\
``//a.py:
first:
  ``.``
``
``
one
``
``//a.py
second:
  ``.``
``
``
two
``
";
        let (out, _) = assemble_text(text, "a.py");
        assert_eq!(out, "first:\n  one\nsecond:\n  two\n");
    }

    #[test]
    fn test_promoted_child_assembles_at_ghost() {
        let text = "\
``//f.py:
a = 1
``.``
``
``
def g():
    ``x``
``
``x:
    return 2
``
";
        let (out, provenance) = assemble_text(text, "f.py");
        assert_eq!(out, "a = 1\ndef g():\n    return 2\n");
        assert_eq!(provenance.lines("f.py"), Some(&[Some(1), Some(5), Some(9)][..]));
    }

    #[test]
    fn test_provenance_across_children() {
        let text = "``//a.py:\none\n``b``\nthree\n``\n``b:\ntwo\n``\n";
        let (out, provenance) = assemble_text(text, "a.py");
        assert_eq!(out, "one\ntwo\nthree\n");
        assert_eq!(provenance.source_line("a.py", 0).unwrap(), Some(1));
        assert_eq!(provenance.source_line("a.py", 1).unwrap(), Some(6));
        assert_eq!(provenance.source_line("a.py", 2).unwrap(), Some(3));
        assert!(provenance.source_line("a.py", 3).is_err());
    }

    #[test]
    fn test_reference_inside_line_replaces_the_line() {
        let text = "``//a.sh:\nx=``val`` # trailing\n``\n``val:\n42\n``\n";
        let (out, _) = assemble_text(text, "a.sh");
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_reference_in_comment_is_not_expanded() {
        let text = "\
main calls ``helper`` first.
``//main.go:
func main() {
    ``helper``
}
``
``helper:
println()
``
";
        let (out, provenance) = assemble_text(text, "main.go");
        assert_eq!(
            out,
            "// main calls ``helper`` first.\nfunc main() {\n    println()\n}\n"
        );
        assert_eq!(provenance.source_line("main.go", 0).unwrap(), Some(0));
    }

    #[test]
    fn test_comment_naming_a_missing_chunk() {
        let text = "main is built from ``parts`` elsewhere.\n``//main.go:\nfunc main() {\n}\n``\n";
        let (out, _) = assemble_text(text, "main.go");
        assert_eq!(
            out,
            "// main is built from ``parts`` elsewhere.\nfunc main() {\n}\n"
        );
    }

    #[test]
    fn test_header_from_hashtag() {
        let mut tree = build("``//build: #sh\necho hi\n``\n").unwrap();
        let mut provenance = ProvenanceMap::new();
        let out = assemble_root(&mut tree, "build", &Config::default(), "doc.ct", &mut provenance)
            .unwrap();
        assert_eq!(
            out,
            "# automatically generated, DON'T EDIT. please edit doc.ct from where this file stems.\necho hi\n"
        );
        assert_eq!(provenance.source_line("build", 0).unwrap(), None);
        assert_eq!(provenance.source_line("build", 1).unwrap(), Some(1));
    }
}
