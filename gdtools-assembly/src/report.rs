use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::{AssemblyReportError, Result};

static METADATA_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\s(.+)[:](.*)").unwrap());

pub const REPORT_SUFFIX: &str = "_assembly_report";

///
/// The `# Key: value` header of an NCBI assembly report.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyReportMetadata {
    pub assembly_name: Option<String>,
    pub organism_name: Option<String>,
    pub infraspecific_name: Option<String>,
    pub taxonomic_id: Option<String>,
    pub biosample_id: Option<String>,
    pub bioproject_id: Option<String>,
    pub submitter: Option<String>,
    pub date: Option<NaiveDate>,
    pub assembly_type: Option<String>,
    pub release_type: Option<String>,
    pub assembly_level: Option<String>,
    pub genome_representation: Option<String>,
    pub wgs_project: Option<String>,
    pub assembly_method: Option<String>,
    pub expected_final_version: Option<String>,
    pub genome_coverage: Option<String>,
    pub sequencing_technology: Option<String>,
    pub genbank_assembly_accession: Option<String>,
    pub refseq_assembly_accession: Option<String>,
    pub refseq_and_genbank_assemblies_identical: bool,
}

impl AssemblyReportMetadata {
    ///
    /// Build the metadata from `key -> value` pairs as they are spelled in the
    /// report (e.g. `Assembly name`, `Taxid`).
    ///
    pub fn from_map(values: &HashMap<String, String>) -> Self {
        let get = |key: &str| values.get(key).cloned();

        let date = values
            .get("Date")
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        AssemblyReportMetadata {
            assembly_name: get("Assembly name"),
            organism_name: get("Organism name"),
            infraspecific_name: get("Infraspecific name"),
            taxonomic_id: get("Taxid"),
            biosample_id: get("BioSample"),
            bioproject_id: get("BioProject"),
            submitter: get("Submitter"),
            date,
            assembly_type: get("Assembly type"),
            release_type: get("Release type"),
            assembly_level: get("Assembly level"),
            genome_representation: get("Genome representation"),
            wgs_project: get("WGS project"),
            assembly_method: get("Assembly method"),
            expected_final_version: get("Expected final version"),
            genome_coverage: get("Genome coverage"),
            sequencing_technology: get("Sequencing technology"),
            genbank_assembly_accession: get("GenBank assembly accession"),
            refseq_assembly_accession: get("RefSeq assembly accession"),
            refseq_and_genbank_assemblies_identical: values
                .get("RefSeq assembly and GenBank assemblies identical")
                .is_some_and(|v| v == "yes"),
        }
    }
}

/// One row of the sequence table at the bottom of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblySequence {
    pub sequence_name: String,
    pub sequence_role: String,
    pub assigned_molecule: String,
    pub location_type: String,
    pub genbank_accession: String,
    pub relationship: String,
    pub refseq_accession: String,
    pub assembly_unit: String,
    /// `None` when the report says `na`.
    pub length: Option<u64>,
    pub ucsc_name: Option<String>,
}

impl AssemblySequence {
    /// Parse a tab separated sequence row; `None` if it has fewer than 9 columns.
    pub fn from_line(line: &str) -> Option<Self> {
        let columns: Vec<&str> = line.split('\t').map(|c| c.trim()).collect();
        if columns.len() < 9 {
            return None;
        }

        Some(AssemblySequence {
            sequence_name: columns[0].to_string(),
            sequence_role: columns[1].to_string(),
            assigned_molecule: columns[2].to_string(),
            location_type: columns[3].to_string(),
            genbank_accession: columns[4].to_string(),
            relationship: columns[5].to_string(),
            refseq_accession: columns[6].to_string(),
            assembly_unit: columns[7].to_string(),
            length: columns[8].parse().ok(),
            ucsc_name: columns
                .get(9)
                .filter(|n| !n.is_empty() && **n != "na")
                .map(|n| n.to_string()),
        })
    }
}

///
/// A parsed `*_assembly_report.txt` file.
///
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    /// File name without `_assembly_report.txt`, e.g. `GCF_002223045.1_ASM222304v1`.
    pub sample_id: String,
    pub metadata: AssemblyReportMetadata,
    /// Every non-comment line longer than two characters.
    pub lines: Vec<String>,
    pub sequences: Vec<AssemblySequence>,
}

impl AssemblyReport {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| AssemblyReportError::FileReadError(path.display().to_string()))?;
        let sample_id = stem.replace(REPORT_SUFFIX, "");

        let report = AssemblyReport::from_text(&sample_id, &contents);
        debug!(
            "Parsed assembly report {} ({} sequences)",
            report.sample_id,
            report.sequences.len()
        );
        Ok(report)
    }

    pub fn from_text(sample_id: &str, contents: &str) -> Self {
        let (comments, lines): (Vec<&str>, Vec<&str>) = contents
            .lines()
            .filter(|l| l.len() > 2)
            .partition(|l| l.starts_with('#'));

        let metadata = AssemblyReportMetadata::from_map(&parse_metadata(&comments));
        let sequences = lines
            .iter()
            .filter_map(|l| AssemblySequence::from_line(l))
            .collect();

        AssemblyReport {
            sample_id: sample_id.to_string(),
            metadata,
            lines: lines.iter().map(|l| l.to_string()).collect(),
            sequences,
        }
    }
}

///
/// Pull `key: value` pairs out of report comment lines. The key runs up to the
/// last colon on the line; both sides are trimmed.
///
pub fn parse_metadata(lines: &[&str]) -> HashMap<String, String> {
    lines
        .iter()
        .filter_map(|line| METADATA_LINE.captures(line))
        .map(|caps| (caps[1].trim().to_string(), caps[2].trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/assembly")
            .join(file_name)
    }

    #[fixture]
    fn report() -> AssemblyReport {
        AssemblyReport::from_path(get_test_path(
            "GCF_002223045.1_ASM222304v1_assembly_report.txt",
        ))
        .unwrap()
    }

    #[rstest]
    fn test_sample_id(report: AssemblyReport) {
        assert_eq!(report.sample_id, "GCF_002223045.1_ASM222304v1");
    }

    #[rstest]
    fn test_metadata(report: AssemblyReport) {
        let metadata = &report.metadata;
        assert_eq!(metadata.assembly_name.as_deref(), Some("ASM222304v1"));
        assert_eq!(
            metadata.organism_name.as_deref(),
            Some("Burkholderia sp. HI4860 (b-proteobacteria)")
        );
        assert_eq!(metadata.infraspecific_name.as_deref(), Some("strain=HI4860"));
        assert_eq!(metadata.taxonomic_id.as_deref(), Some("2015361"));
        assert_eq!(metadata.date, NaiveDate::from_ymd_opt(2017, 7, 20));
        assert_eq!(metadata.assembly_method.as_deref(), Some("SPAdes v. 3.7.0"));
        assert_eq!(metadata.refseq_assembly_accession.as_deref(), Some("GCF_002223045.1"));
        assert!(metadata.refseq_and_genbank_assemblies_identical);
    }

    #[rstest]
    fn test_sequences(report: AssemblyReport) {
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.sequences.len(), 2);
        assert_eq!(report.sequences[0].sequence_name, "NODE_1");
        assert_eq!(report.sequences[0].length, Some(1530842));
        assert_eq!(report.sequences[1].length, None);
        assert_eq!(report.sequences[1].ucsc_name, None);
    }

    #[rstest]
    fn test_missing_fields_are_none() {
        let report = AssemblyReport::from_text("x", "# Assembly name:  ASM1v1\n# Date: not-a-date\n");
        assert_eq!(report.metadata.assembly_name.as_deref(), Some("ASM1v1"));
        assert_eq!(report.metadata.organism_name, None);
        assert_eq!(report.metadata.date, None);
        assert!(!report.metadata.refseq_and_genbank_assemblies_identical);
        assert!(report.sequences.is_empty());
    }

    #[rstest]
    fn test_metadata_serializes(report: AssemblyReport) {
        let value = serde_json::to_value(&report.metadata).unwrap();
        assert_eq!(value["date"], "2017-07-20");
        assert_eq!(value["wgs_project"], "NKFO01");
    }
}
