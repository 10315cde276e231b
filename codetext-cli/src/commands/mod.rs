//! CLI command implementations.

pub mod locate;
pub mod tangle;
pub mod tree;

pub use locate::{locate, LocateOptions};
pub use tangle::{tangle, TangleOptions};
pub use tree::{tree, TreeOptions};
