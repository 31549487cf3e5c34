use thiserror::Error;

#[derive(Error, Debug)]
pub enum FastqConcatError {
    #[error("Sample sheet {0} has no Sample_Name column")]
    MissingSampleNameColumn(String),

    #[error("Sample sheet not found: {0}")]
    SampleSheetNotFound(String),

    #[error("No home directory to place the default output folder in")]
    NoHomeDirectory,

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FastqConcatError>;
