use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use glob::{Pattern, glob};

use crate::errors::{FastqConcatError, Result};

pub const SAMPLE_SHEET_NAME: &str = "SampleSheet.csv";
pub const SAMPLE_NAME_COLUMN: &str = "Sample_Name";

/// Lines before the sample table in a sheet without a `[Data]` marker.
pub const SAMPLE_SHEET_HEADER_LINES: usize = 9;

///
/// Find the sample sheets of every run folder directly under `folder`
/// (`<folder>/*/SampleSheet.csv`).
///
pub fn find_sample_sheets<P: AsRef<Path>>(folder: P) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*/{}",
        Pattern::escape(&folder.as_ref().to_string_lossy()),
        SAMPLE_SHEET_NAME
    );

    let mut sheets = glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
    sheets.sort();
    Ok(sheets)
}

///
/// Read the `Sample_Name` column of an Illumina sample sheet.
///
/// The sample table starts after the `[Data]` line. Sheets without one are
/// assumed to carry the standard nine header lines.
///
pub fn read_sample_names<P: AsRef<Path>>(sheet: P) -> Result<Vec<String>> {
    let sheet = sheet.as_ref();
    let contents = fs::read_to_string(sheet)?;

    let lines: Vec<&str> = contents.lines().collect();
    let start = lines
        .iter()
        .position(|l| l.trim_start().starts_with("[Data]"))
        .map(|i| i + 1)
        .unwrap_or(SAMPLE_SHEET_HEADER_LINES);
    let table = lines.get(start..).unwrap_or_default().join("\n");

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(table.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == SAMPLE_NAME_COLUMN)
        .ok_or_else(|| FastqConcatError::MissingSampleNameColumn(sheet.display().to_string()))?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(column).map(str::trim).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/fastq")
            .join(file_name)
    }

    #[rstest]
    #[case("SampleSheet.csv")]
    #[case("SampleSheet_no_marker.csv")]
    fn test_read_sample_names(#[case] file_name: &str) {
        let names = read_sample_names(get_test_path(file_name)).unwrap();
        assert_eq!(names, vec!["AU1054", "P148-1", "P148-2"]);
    }

    #[rstest]
    fn test_missing_sample_name_column() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join(SAMPLE_SHEET_NAME);
        fs::write(&sheet, "[Data]\nSample_ID,Project\nS1,proj\n").unwrap();

        let result = read_sample_names(&sheet);
        assert!(matches!(
            result,
            Err(FastqConcatError::MissingSampleNameColumn(_))
        ));
    }

    #[rstest]
    fn test_find_sample_sheets() {
        let dir = tempfile::tempdir().unwrap();
        for run in ["180423_B", "180416_A", "180501_C"] {
            fs::create_dir_all(dir.path().join(run)).unwrap();
        }
        fs::write(dir.path().join("180416_A").join(SAMPLE_SHEET_NAME), "").unwrap();
        fs::write(dir.path().join("180423_B").join(SAMPLE_SHEET_NAME), "").unwrap();

        let sheets = find_sample_sheets(dir.path()).unwrap();
        assert_eq!(
            sheets,
            vec![
                dir.path().join("180416_A").join(SAMPLE_SHEET_NAME),
                dir.path().join("180423_B").join(SAMPLE_SHEET_NAME),
            ]
        );
    }
}
