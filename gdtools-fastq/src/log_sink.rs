use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::Result;

pub const LOG_FILE_NAME: &str = "fastq_concat_log_file.txt";

///
/// Progress messages for a concatenation run. Every message is appended to
/// `<output>/fastq_concat_log_file.txt` and emitted through `log::info!`.
///
#[derive(Debug, Clone)]
pub struct ConcatLog {
    path: PathBuf,
}

impl ConcatLog {
    pub fn new<P: AsRef<Path>>(output_folder: P) -> Self {
        ConcatLog {
            path: output_folder.as_ref().join(LOG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", message)?;
        info!("{}", message);
        Ok(())
    }
}
