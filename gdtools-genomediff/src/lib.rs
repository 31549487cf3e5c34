//! # breseq genome-diff parsing and conversion
//!
//! This crate reads genome-diff (`.gd`) files written by breseq. It provides:
//!
//! - the per-type positional field schema and line classifier
//! - typed mutation/evidence records and [GenomeDiffDocument] with its lookup indices
//! - conversion of mutations to VCF records against a reference sequence
//! - the flattened mutation/evidence map used for YAML/JSON export
//! - per-isolate and per-isolate-set mutation tables
//!
//! # Example
//!
//! ```no_run
//! use gdtools_core::GenomeAssembly;
//! use gdtools_genomediff::GenomeDiffDocument;
//!
//! let document = GenomeDiffDocument::from_path("annotated.gd").unwrap();
//! let reference = GenomeAssembly::try_from("reference.fasta").unwrap();
//!
//! for record in document.to_vcf(&reference).unwrap() {
//!     println!("{}", record);
//! }
//! ```

pub mod document;
pub mod errors;
pub mod isolate;
pub mod models;
pub mod schema;
pub mod vcf;

pub use document::GenomeDiffDocument;
pub use errors::{GenomeDiffError, Result};
pub use isolate::{Isolate, IsolateRow, IsolateSet};
pub use models::{ExportEntry, FlatValue, Record, RecordKind};
pub use schema::{LineKind, classify, named_fields};
pub use vcf::VcfRecord;
