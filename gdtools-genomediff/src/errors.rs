use std::io;

use gdtools_core::ReferenceError;
use thiserror::Error;

/// Error type for genome-diff parsing and conversion.
#[derive(Error, Debug)]
pub enum GenomeDiffError {
    /// A 2 or 3 letter record tag that has no entry in the field schema.
    #[error("Unknown genome diff record type: '{0}'")]
    UnknownRecordType(String),

    /// A mutation cites an evidence id that the document does not contain.
    #[error("Mutation '{mutation}' references unknown evidence id '{evidence}'")]
    MissingEvidence { mutation: String, evidence: String },

    /// The mutation type has no VCF representation.
    #[error("'{0}' Invalid mutation type!")]
    UnsupportedMutationType(String),

    /// No reference sequence with this id was supplied.
    #[error("No reference sequence found for seq_id '{0}'")]
    MissingReference(String),

    #[error("Record '{id}' is missing required field '{field}'")]
    MissingField { id: String, field: String },

    #[error("Record '{id}' has a non-integer value for '{field}': '{value}'")]
    InvalidInteger {
        id: String,
        field: String,
        value: String,
    },

    /// 1-based, end-exclusive span that does not fit the reference.
    #[error("Span {start}..{end} is outside of '{seq_id}' (length {length})")]
    PositionOutOfBounds {
        seq_id: String,
        start: u64,
        end: u64,
        length: usize,
    },

    #[error("Not a breseq output folder: {0}")]
    NotADirectory(String),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Table(#[from] csv::Error),

    /// IO error occurred during file operations.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for genome-diff operations.
pub type Result<T> = std::result::Result<T, GenomeDiffError>;
