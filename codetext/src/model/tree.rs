//! The node tree and the builder that resolves chunk paths into it.

use std::collections::{HashMap, VecDeque};
use std::ops::Index;

use indexmap::IndexMap;

use crate::config::{ghost_name, parse_reference, split_declaration, ANONYMOUS};
use crate::errors::{CodetextError, Result};
use crate::readers::ChunkToken;
use crate::text_location::TextLocation;

use super::node::{Line, Node, NodeId};
use super::path::{Anchor, ChunkPath, Step};

/// Arena of nodes plus the root set.
///
/// Nodes are never removed. Promotion out of a ghost rewrites handles
/// only, so a `NodeId` stays valid for the lifetime of the tree.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    roots: IndexMap<String, NodeId>,
    node_at_line: HashMap<usize, NodeId>,
}

impl Index<NodeId> for NodeTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl NodeTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a node, if the handle belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of nodes, ghosts included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }

    /// Returns a root by name.
    pub fn root(&self, name: &str) -> Option<NodeId> {
        self.roots.get(name).copied()
    }

    /// Root names in sorted order.
    pub fn root_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Roots in discovery order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.roots.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// The node a source line was appended to, for body, opening and closing lines.
    pub fn node_at_line(&self, line: usize) -> Option<NodeId> {
        self.node_at_line.get(&line).copied()
    }

    /// Walks up from a node to the first node that isn't a ghost.
    pub fn last_named_parent(&self, id: NodeId) -> NodeId {
        let mut walk = id;
        while self[walk].is_ghost() {
            match self[walk].parent {
                Some(parent) => walk = parent,
                None => break,
            }
        }
        walk
    }

    /// The full path of a node, like `//zoo.py/animals/.0/lion`.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = vec![self[id].name.as_str()];
        let mut walk = id;
        while let Some(parent) = self[walk].parent {
            names.push(&self[parent].name);
            walk = parent;
        }
        names.reverse();
        format!("//{}", names.join("/"))
    }

    /// Looks up a named child. Ghosts look through their last named parent,
    /// where their named children end up after promotion.
    pub fn named_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        if let Some(child) = self[id].children.get(name) {
            return Some(*child);
        }
        if self[id].is_ghost() {
            let lnp = self.last_named_parent(id);
            return self[lnp].children.get(name).copied();
        }
        None
    }

    /// Breadth-first search for every node called `name` in the subtree
    /// at `start`, `start` included. Ghost children are searched too.
    pub fn search(&self, start: NodeId, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            let node = &self[id];
            if node.name == name {
                found.push(id);
            }
            queue.extend(node.children.values().copied());
            queue.extend(node.ghost_children.iter().copied());
        }
        found
    }

    /// Resolves a plain `root/child/...` path through named children only.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut segments = path
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty());
        let mut node = self.root(segments.next()?)?;
        for segment in segments {
            node = *self[node].children.get(segment)?;
        }
        Some(node)
    }
}

/// Builds a [`NodeTree`] from chunks fed in document order.
///
/// Holds the run-scoped state: the current node and the ghost left open
/// by the previous chunk's anonymous reference.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: NodeTree,
    current: Option<NodeId>,
    open_ghost: Option<NodeId>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree built so far.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// The node the last chunk was appended to.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Puts a scanned chunk, recording its language tag on the target node.
    pub fn put_chunk(&mut self, chunk: &ChunkToken) -> Result<NodeId> {
        let id = self.put(&chunk.path, &chunk.body, chunk.start_line, &chunk.prose)?;
        if let Some(tag) = &chunk.language {
            let node = self.tree.node_mut(id);
            if node.language.is_none() {
                node.language = Some(tag.clone());
            }
        }
        Ok(id)
    }

    /// Resolves `path`, checks declaration order and appends `body`.
    ///
    /// `start_line` is the 0-indexed source line of the first body line.
    pub fn put(&mut self, path: &str, body: &str, start_line: usize, prose: &str) -> Result<NodeId> {
        let location = TextLocation::from_index(start_line.saturating_sub(1));
        let stay = path.trim().is_empty() || path.trim() == ANONYMOUS;

        let node = match self.open_ghost.take() {
            Some(ghost) if stay => {
                // filling a ghost declares it
                self.tree.node_mut(ghost).declared = true;
                ghost
            }
            _ => {
                let (path, is_declaration) = split_declaration(path);
                let path = path.trim();
                let parsed = ChunkPath::parse(path, &location)?;

                if self.current.is_none() && !parsed.is_from_root() {
                    return Err(CodetextError::MissingAttachmentPoint {
                        location,
                        path: path.to_string(),
                    });
                }

                let node = self.walk(self.current, &parsed, path, &location)?;
                let declared = self.tree[node].declared;
                // the first chunk of a root declares it, colon or not
                let is_declaration = is_declaration
                    || (!declared && self.tree[node].is_root() && self.tree[node].chunk_count == 0);
                if is_declaration && declared {
                    return Err(CodetextError::RedeclaredChunk {
                        location,
                        path: self.tree.path_of(node),
                    });
                }
                if !is_declaration && !declared {
                    return Err(CodetextError::UndeclaredAppend {
                        location,
                        path: self.tree.path_of(node),
                    });
                }
                if is_declaration {
                    self.tree.node_mut(node).declared = true;
                }
                node
            }
        };

        self.current = Some(node);
        self.append(node, body, start_line, prose)?;
        Ok(node)
    }

    /// Exits every ghost still open and returns the finished tree.
    pub fn finish(mut self) -> Result<NodeTree> {
        let location = TextLocation::default();
        self.exit_to_root(self.current, "/", &location)?;

        // ghosts left behind by jumps, e.g. a search into a sibling subtree
        let ghosts: Vec<NodeId> = self
            .tree
            .iter()
            .filter(|(_, node)| node.is_ghost() && !node.children.is_empty())
            .map(|(id, _)| id)
            .collect();
        for ghost in ghosts {
            self.exit_ghost(ghost)?;
        }
        Ok(self.tree)
    }

    fn walk(
        &mut self,
        from: Option<NodeId>,
        path: &ChunkPath,
        text: &str,
        location: &TextLocation,
    ) -> Result<NodeId> {
        let start = match &path.anchor {
            Anchor::Current => from,
            Anchor::TreeRoot => self.exit_to_root(from, text, location)?,
            Anchor::NamedRoot(name) => {
                self.exit_to_root(from, text, location)?;
                Some(self.root_or_create(name))
            }
        };
        let mut node = start.ok_or_else(|| CodetextError::MissingAttachmentPoint {
            location: location.clone(),
            path: text.to_string(),
        })?;

        for step in &path.steps {
            node = match step {
                Step::Stay => node,
                Step::Up => self.step_up(node, text, location)?,
                Step::Child(name) => match self.tree[node].children.get(name) {
                    Some(child) => *child,
                    None => self.create_child(node, name),
                },
                Step::Search(name) => {
                    let found = self.tree.search(node, name);
                    if found.len() != 1 {
                        return Err(CodetextError::AmbiguousOrMissingSubtreeReference {
                            location: location.clone(),
                            name: name.clone(),
                            under: self.tree.path_of(node),
                            found: found.len(),
                        });
                    }
                    found[0]
                }
            };
        }
        Ok(node)
    }

    /// Steps to the parent, exiting the node first if it's a ghost.
    fn step_up(&mut self, id: NodeId, text: &str, location: &TextLocation) -> Result<NodeId> {
        if self.tree[id].is_ghost() {
            self.exit_ghost(id)?;
        }
        self.tree[id]
            .parent
            .ok_or_else(|| CodetextError::PathEscapesRoot {
                location: location.clone(),
                path: text.to_string(),
                root: self.tree.path_of(id),
            })
    }

    fn exit_to_root(
        &mut self,
        from: Option<NodeId>,
        text: &str,
        location: &TextLocation,
    ) -> Result<Option<NodeId>> {
        let Some(mut node) = from else {
            return Ok(None);
        };
        while !self.tree[node].is_root() {
            node = self.step_up(node, text, location)?;
        }
        Ok(Some(node))
    }

    /// Moves a ghost's named children to its last named parent.
    fn exit_ghost(&mut self, ghost: NodeId) -> Result<()> {
        if !self.tree[ghost].is_ghost() || self.tree[ghost].children.is_empty() {
            return Ok(());
        }
        let lnp = self.tree.last_named_parent(ghost);
        let children = std::mem::take(&mut self.tree.node_mut(ghost).children);

        for (name, child) in children {
            if let Some(existing) = self.tree[lnp].children.get(&name) {
                if *existing != child {
                    let location = self.tree[child]
                        .lines
                        .first()
                        .and_then(|line| line.origin)
                        .map(TextLocation::from_index)
                        .unwrap_or_default();
                    return Err(CodetextError::RedeclaredChunk {
                        location,
                        path: self.tree.path_of(*existing),
                    });
                }
            }
            tracing::debug!(
                "promoting {} to {}",
                self.tree.path_of(child),
                self.tree.path_of(lnp)
            );
            let node = self.tree.node_mut(child);
            node.ghost_parent = Some(ghost);
            node.parent = Some(lnp);
            self.tree.node_mut(lnp).children.insert(name, child);
        }
        Ok(())
    }

    fn root_or_create(&mut self, name: &str) -> NodeId {
        if let Some(root) = self.tree.root(name) {
            return root;
        }
        tracing::debug!("new root {}", name);
        let id = self.tree.alloc(Node::new(name, None));
        self.tree.roots.insert(name.to_string(), id);
        id
    }

    /// Creates a named child. Under a ghost, a same-named child of the
    /// last named parent is moved into the ghost instead.
    fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if self.tree[parent].is_ghost() {
            let lnp = self.tree.last_named_parent(parent);
            if let Some(existing) = self.tree.node_mut(lnp).children.shift_remove(name) {
                self.tree.node_mut(existing).parent = Some(parent);
                self.tree
                    .node_mut(parent)
                    .children
                    .insert(name.to_string(), existing);
                return existing;
            }
        }
        let id = self.tree.alloc(Node::new(name, Some(parent)));
        self.tree
            .node_mut(parent)
            .children
            .insert(name.to_string(), id);
        tracing::debug!("new node {}", self.tree.path_of(id));
        id
    }

    fn create_ghost(&mut self, parent: NodeId) -> NodeId {
        let name = ghost_name(self.tree[parent].ghost_children.len());
        let id = self.tree.alloc(Node::new(name, Some(parent)));
        self.tree.node_mut(parent).ghost_children.push(id);
        id
    }

    /// Appends body lines to a node and creates the children its references name.
    fn append(&mut self, id: NodeId, body: &str, start_line: usize, prose: &str) -> Result<()> {
        // only the very next chunk may fill a ghost
        self.open_ghost = None;

        let new_lines: Vec<Line> = body
            .lines()
            .enumerate()
            .map(|(i, text)| Line::new(text, Some(start_line + i)))
            .collect();

        let prose_count = prose.lines().count();
        let prose_start = start_line.saturating_sub(1 + prose_count);
        let mut prose_lines: Vec<Line> = prose
            .lines()
            .enumerate()
            .map(|(i, text)| Line::new(text, Some(prose_start + i)))
            .collect();
        while prose_lines
            .last()
            .is_some_and(|line| line.text.trim().is_empty())
        {
            prose_lines.pop();
        }

        let offset = self.tree[id].lines.len();
        self.tree.node_mut(id).prose.insert(offset, prose_lines);

        for i in 0..new_lines.len() {
            self.tree.node_at_line.insert(start_line + i, id);
        }
        if start_line > 0 {
            self.tree.node_at_line.insert(start_line - 1, id);
        }
        self.tree.node_at_line.insert(start_line + new_lines.len(), id);

        let chunk_ordinal = self.tree[id].chunk_count;
        for (i, line) in new_lines.iter().enumerate() {
            let Some(reference) = parse_reference(&line.text) else {
                continue;
            };
            let child = if reference.is_anonymous() {
                if self.open_ghost.is_some() {
                    return Err(CodetextError::MultipleGhostsPerChunk {
                        location: TextLocation::from_index(start_line + i),
                    });
                }
                let ghost = self.create_ghost(id);
                self.open_ghost = Some(ghost);
                ghost
            } else {
                match self.tree[id].children.get(reference.name) {
                    Some(child) => *child,
                    None => self.create_child(id, reference.name),
                }
            };

            let node = self.tree.node_mut(child);
            node.referenced = true;
            node.line_in_parent = offset + i;
            node.chunk_in_parent = chunk_ordinal;
            self.tree
                .node_mut(id)
                .child_at_line
                .insert(start_line + i, child);
        }

        let node = self.tree.node_mut(id);
        node.lines.extend(new_lines);
        node.chunk_count += 1;
        Ok(())
    }
}

/// Builds the tree for a scanned document and exits open ghosts.
pub fn build_tree(chunks: &[ChunkToken]) -> Result<NodeTree> {
    let mut builder = TreeBuilder::new();
    for chunk in chunks {
        builder.put_chunk(chunk)?;
    }
    builder.finish()
}
