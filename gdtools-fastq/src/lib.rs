//! # Demultiplexed FASTQ concatenation
//!
//! Sequencers split each sample's reads over several lanes. Given the
//! `SampleSheet.csv` of a run and the demultiplexing folder, this crate
//! concatenates every sample's lane files into one gzip'd FASTQ per read
//! (`<sample>_R1.fastq.gz`, `<sample>_R2.fastq.gz`, ...).
//!
//! Gzip allows members to be concatenated, so files are joined byte for byte
//! without decompressing.

pub mod concat;
pub mod errors;
pub mod log_sink;
pub mod sheet;

pub use concat::{
    ConcatOptions, combine_files, concatenate_files, find_fastq_files, group_by_read, run,
};
pub use errors::{FastqConcatError, Result};
pub use log_sink::ConcatLog;
pub use sheet::{find_sample_sheets, read_sample_names};
