use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyReportError {
    #[error("Can't read assembly report: {0}")]
    FileReadError(String),

    #[error("Not a tree file: {0}")]
    InvalidTreePath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AssemblyReportError>;
