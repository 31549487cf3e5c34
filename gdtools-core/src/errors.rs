use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Error reading FASTA file {path}: {message}")]
    FastaReadError { path: String, message: String },

    #[error("FASTA file contains no sequences: {0}")]
    EmptyReference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
