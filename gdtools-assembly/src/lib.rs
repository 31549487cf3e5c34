//! NCBI assembly reports and the tree labels derived from them.
//!
//! - [AssemblyReport] parses the `*_assembly_report.txt` files shipped with
//!   NCBI genome downloads into typed metadata and sequence rows
//! - [tree::relabel_tree] swaps `<accession>_<assembly>` leaf names in a
//!   Newick tree for `<organism>|<strain>` labels

pub mod errors;
pub mod report;
pub mod tree;

pub use errors::{AssemblyReportError, Result};
pub use report::{AssemblyReport, AssemblyReportMetadata, AssemblySequence};
pub use tree::{label_map, relabel_tree};
