//! Stream plumbing around the merge engine.
//!
//! * [`input`]: turns input names into readable [`Source`]s.
//! * [`output`]: turns the output name into a sink and writes the merged file.
//! * [`filetype`]: rejects paths that are neither regular files, FIFOs nor character devices.

pub mod filetype;
pub mod input;
pub mod output;

pub use input::{InputSpec, Source};
pub use output::OutputSpec;

/// Name that stands for standard input or standard output.
pub const STDIO_NAME: &str = "-";
