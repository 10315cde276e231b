//! Writing generated files.

mod output;

pub use output::{atomic_write, output_paths, write_outputs, OutputFile};
