use std::io;
use thiserror::Error;

use gdtools_genomediff::GenomeDiffError;

/// Error type for gdtools-io operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be converted or resolved.
    #[error(transparent)]
    GenomeDiff(#[from] GenomeDiffError),

    #[error("Failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gdtools-io operations.
pub type Result<T> = std::result::Result<T, WriteError>;
