//! # svcmerge core
//!
//! Merges `services(5)` files into one deduplicated, sorted file.
//!
//! * **[`parser`]**: classifies single lines.
//! * **[`merge`]**: folds parsed records by `(port, protocol)`.
//! * **[`render`]**: writes the merged records back out in canonical form.
//! * **[`io`]**: opens inputs and writes the destination.
//! * **[`job`]**: ties the above together for one run.

pub mod io;
pub mod job;
pub mod merge;
pub mod parser;
pub mod render;

pub use job::{MergeJob, MergeSummary};
pub use merge::{MergedServices, Merger, merge};
