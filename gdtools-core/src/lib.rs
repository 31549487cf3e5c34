//! # gdtools-core
//!
//! Shared building blocks for the gdtools crates: gzip-aware readers and an
//! in-memory reference genome that the genome-diff converter slices alleles from.

pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use errors::ReferenceError;
pub use models::{GenomeAssembly, SequenceLookup};
