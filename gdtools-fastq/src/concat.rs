use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use log::warn;

use crate::errors::{FastqConcatError, Result};
use crate::log_sink::ConcatLog;
use crate::sheet::{find_sample_sheets, read_sample_names};

pub const DEFAULT_OUTPUT_FOLDER: &str = "concatenated_fastq_files";

/// Copy buffer used when joining FASTQ files.
pub const COPY_BUFFER_SIZE: usize = 10 * 1024 * 1024;

///
/// Settings for a concatenation run.
///
#[derive(Debug, Clone)]
pub struct ConcatOptions {
    /// A `SampleSheet.csv`, or a folder of run folders each holding one.
    pub sheet: PathBuf,
    /// Demultiplexing folder laid out as `<run>/<project>/<sample>/*.fastq.gz`.
    pub dmux: PathBuf,
    pub output: PathBuf,
    /// Only process runs whose folder name starts with one of these.
    pub runs: Option<Vec<String>>,
}

impl ConcatOptions {
    pub fn new<P: AsRef<Path>>(sheet: P, dmux: P, output: P) -> Self {
        ConcatOptions {
            sheet: sheet.as_ref().to_path_buf(),
            dmux: dmux.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            runs: None,
        }
    }

    pub fn with_runs(mut self, runs: Vec<String>) -> Self {
        self.runs = Some(runs);
        self
    }

    fn includes_run(&self, run_name: &str) -> bool {
        match &self.runs {
            Some(runs) => runs.iter().any(|prefix| run_name.starts_with(prefix.as_str())),
            None => true,
        }
    }
}

/// `~/concatenated_fastq_files`
pub fn default_output_folder() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_OUTPUT_FOLDER))
        .ok_or(FastqConcatError::NoHomeDirectory)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

///
/// Every `<dmux>/*/*/*/<sample>_*.fastq.gz`, sorted.
///
pub fn find_fastq_files<P: AsRef<Path>>(dmux: P, sample: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*/*/*/{}_*.fastq.gz",
        Pattern::escape(&dmux.as_ref().to_string_lossy()),
        Pattern::escape(sample)
    );

    let mut files = glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

///
/// Group lane files by read. The read is the second to last `_` token of the
/// file stem, so `S1_L001_R1_001.fastq.gz` belongs to `R1`.
///
pub fn group_by_read(files: &[PathBuf]) -> BTreeMap<String, Vec<PathBuf>> {
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for file in files {
        let stem = stem_of(file);
        let tokens: Vec<&str> = stem.split('_').collect();
        if tokens.len() < 2 {
            warn!("Can't tell which read {} belongs to", file.display());
            continue;
        }
        groups
            .entry(tokens[tokens.len() - 2].to_string())
            .or_default()
            .push(file.clone());
    }

    for values in groups.values_mut() {
        values.sort();
    }
    groups
}

///
/// Write `files` one after another into `output`.
///
/// # Returns
/// The number of bytes written
pub fn concatenate_files<P: AsRef<Path>>(output: P, files: &[PathBuf]) -> Result<u64> {
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, File::create(output)?);

    let mut written = 0;
    for file in files {
        let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, File::open(file)?);
        written += io::copy(&mut reader, &mut writer)?;
    }
    writer.flush()?;

    Ok(written)
}

///
/// Concatenate the FASTQ files of every sample in a sample sheet.
///
/// Output goes to `<output>/<run folder>/<sample>_<read>.fastq.gz`, where the
/// run folder is the folder holding the sheet.
///
/// # Returns
/// The files written
pub fn combine_files<P: AsRef<Path>>(
    sheet: P,
    dmux: P,
    output: P,
    log: &ConcatLog,
) -> Result<Vec<PathBuf>> {
    let sheet = sheet.as_ref();
    let run_name = sheet.parent().map(stem_of).unwrap_or_default();
    let run_folder = output.as_ref().join(&run_name);

    let mut written = Vec::new();
    for sample in read_sample_names(sheet)? {
        let files = find_fastq_files(dmux.as_ref(), &sample)?;
        log.write(&format!("{} {}", run_name, sample))?;

        for (key, values) in group_by_read(&files) {
            let output_filename = run_folder.join(format!("{}_{}.fastq.gz", sample, key));
            create_dir_all(&run_folder)?;

            log.write(&format!("\tCombining '{}-{}'", sample, key))?;
            for value in &values {
                log.write(&format!("\t\t{}", value.display()))?;
            }
            log.write(&format!("\tOutput File: {}", output_filename.display()))?;

            concatenate_files(&output_filename, &values)?;
            written.push(output_filename);
        }
    }

    Ok(written)
}

///
/// Run a full concatenation: resolve the sample sheets, filter them by run
/// and combine each one.
///
pub fn run(options: &ConcatOptions) -> Result<Vec<PathBuf>> {
    create_dir_all(&options.output)?;
    let log = ConcatLog::new(&options.output);

    let sheets = if options.sheet.is_dir() {
        find_sample_sheets(&options.sheet)?
    } else if options.sheet.is_file() {
        vec![options.sheet.clone()]
    } else {
        return Err(FastqConcatError::SampleSheetNotFound(
            options.sheet.display().to_string(),
        ));
    };

    let mut written = Vec::new();
    for sheet in sheets {
        log.write(&format!("Using {}...", sheet.display()))?;

        let run_name = sheet.parent().map(stem_of).unwrap_or_default();
        if !options.includes_run(&run_name) {
            continue;
        }
        written.extend(combine_files(
            sheet.as_path(),
            options.dmux.as_path(),
            options.output.as_path(),
            &log,
        )?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_group_by_read() {
        let files: Vec<PathBuf> = [
            "d/P148-1_S2_L002_R2_001.fastq.gz",
            "d/P148-1_S2_L001_R1_001.fastq.gz",
            "d/P148-1_S2_L002_R1_001.fastq.gz",
            "d/P148-1_S2_L001_R2_001.fastq.gz",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        let groups = group_by_read(&files);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["R1", "R2"]);
        assert_eq!(
            groups["R1"],
            vec![
                PathBuf::from("d/P148-1_S2_L001_R1_001.fastq.gz"),
                PathBuf::from("d/P148-1_S2_L002_R1_001.fastq.gz"),
            ]
        );
    }

    #[rstest]
    fn test_group_by_read_skips_unsplittable() {
        let groups = group_by_read(&[PathBuf::from("reads.fastq.gz")]);
        assert!(groups.is_empty());
    }

    #[rstest]
    fn test_concatenate_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::write(&a, b"@r1\nACGT\n+\nIIII\n").unwrap();
        std::fs::write(&b, b"@r2\nTTTT\n+\nIIII\n").unwrap();

        let output = dir.path().join("out");
        let written = concatenate_files(&output, &[a, b]).unwrap();

        assert_eq!(written, 32);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "@r1\nACGT\n+\nIIII\n@r2\nTTTT\n+\nIIII\n"
        );
    }

    #[rstest]
    #[case(None, "180416_NB501145", true)]
    #[case(Some(vec!["180416".to_string()]), "180416_NB501145", true)]
    #[case(Some(vec!["180416".to_string(), "180423".to_string()]), "180501_NB501145", false)]
    fn test_includes_run(
        #[case] runs: Option<Vec<String>>,
        #[case] run_name: &str,
        #[case] expected: bool,
    ) {
        let mut options = ConcatOptions::new("sheet", "dmux", "out");
        options.runs = runs;
        assert_eq!(options.includes_run(run_name), expected);
    }
}
