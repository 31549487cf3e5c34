//! # Input/Output utilities for genome-diff data.
//!
//! This small crate writes parsed genome-diff documents back to disk: as
//! header-less VCF (plain or gzip'd), or as a YAML/JSON map of mutations to
//! the evidence supporting them.
//!
pub mod error;
pub mod writer;

// re-expose core functions
pub use error::*;
pub use writer::*;
