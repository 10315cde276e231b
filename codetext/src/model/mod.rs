//! The chunk tree: path resolution, validation, comments and assembly.

mod assemble;
mod comments;
mod node;
mod path;
mod provenance;
mod tree;
mod validate;

pub use assemble::{assemble_root, Assembler};
pub use comments::{header_text, insert_comments};
pub use node::{Line, Node, NodeId};
pub use path::{Anchor, ChunkPath, Step};
pub use provenance::ProvenanceMap;
pub use tree::{build_tree, NodeTree, TreeBuilder};
pub use validate::{find_violations, validate, Violation, ViolationKind};
