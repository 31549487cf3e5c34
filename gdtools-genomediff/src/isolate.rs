//! Tables over breseq output folders.
//!
//! An isolate is one breseq run folder; an isolate set is a folder holding
//! several of them. Each isolate yields a TSV of its annotated mutations, and
//! the set concatenates those into one table.

use std::fs::{create_dir_all, read_dir};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use gdtools_core::GenomeAssembly;
use indicatif::ProgressBar;
use log::{info, warn};
use serde::Serialize;

use crate::document::GenomeDiffDocument;
use crate::errors::{GenomeDiffError, Result};

pub const SAMPLE_OUTPUT_FOLDER: &str = "sample_output";
pub const ISOLATE_SET_OUTPUT_FOLDER: &str = "isolate_set_output";
pub const ISOLATE_TABLE_NAME: &str = "annotated_table.tsv";
pub const COMBINED_TABLE_NAME: &str = "isolate_set_combined_table.tsv";

/// One row of an isolate's mutation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsolateRow {
    pub sample: String,
    #[serde(rename = "ref")]
    pub ref_allele: String,
    #[serde(rename = "alt")]
    pub alt_allele: String,
    pub position: Option<u64>,
    #[serde(rename = "sequenceId")]
    pub sequence_id: String,
    #[serde(rename = "mutationType")]
    pub mutation_type: String,
}

///
/// A single breseq output folder.
///
pub struct Isolate {
    pub path: PathBuf,
    pub sample_id: String,
    pub output_folder: PathBuf,
    pub output_vcf: PathBuf,
    pub gd_basic: PathBuf,
    pub gd_evidence: PathBuf,
    pub gd_annotated: PathBuf,
    pub index: PathBuf,
    pub reference_path: PathBuf,
    pub annotated: GenomeDiffDocument,
    reference: GenomeAssembly,
}

impl Isolate {
    ///
    /// Open a breseq output folder, parsing `output/evidence/annotated.gd`
    /// and loading `data/reference.fasta`.
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Isolate> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(GenomeDiffError::NotADirectory(path.display().to_string()));
        }

        let sample_id = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let gd_annotated = path.join("output").join("evidence").join("annotated.gd");
        let reference_path = path.join("data").join("reference.fasta");

        let annotated = GenomeDiffDocument::from_path(&gd_annotated)?;
        let reference = GenomeAssembly::try_from(reference_path.as_path())?;

        Ok(Isolate {
            path: path.to_path_buf(),
            sample_id,
            output_folder: path.join(SAMPLE_OUTPUT_FOLDER),
            output_vcf: path.join("data").join("output.vcf"),
            gd_basic: path.join("output").join("output.gd"),
            gd_evidence: path.join("output").join("evidence").join("evidence.gd"),
            gd_annotated,
            index: path.join("output").join("index.html"),
            reference_path,
            annotated,
            reference,
        })
    }

    pub fn reference(&self) -> &GenomeAssembly {
        &self.reference
    }

    /// Parse `output/output.gd`.
    pub fn load_basic(&self) -> Result<GenomeDiffDocument> {
        GenomeDiffDocument::from_path(&self.gd_basic)
    }

    /// Parse `output/evidence/evidence.gd`.
    pub fn load_evidence(&self) -> Result<GenomeDiffDocument> {
        GenomeDiffDocument::from_path(&self.gd_evidence)
    }

    pub fn default_table_path(&self) -> PathBuf {
        self.output_folder.join(ISOLATE_TABLE_NAME)
    }

    /// One row per annotated mutation; the first unconvertible mutation fails.
    pub fn output_rows(&self) -> Result<Vec<IsolateRow>> {
        let records = self.annotated.to_vcf(&self.reference)?;

        Ok(self
            .annotated
            .mutations()
            .iter()
            .zip(records)
            .map(|(mutation, vcf)| IsolateRow {
                sample: self.sample_id.clone(),
                ref_allele: vcf.ref_allele,
                alt_allele: vcf.alt_allele,
                position: mutation.position,
                sequence_id: vcf.chrom,
                mutation_type: mutation.record_type.clone(),
            })
            .collect())
    }

    ///
    /// Write the isolate's mutation table as TSV.
    ///
    /// # Arguments
    /// - path: where to write; defaults to `sample_output/annotated_table.tsv`
    pub fn generate_output_table(&self, path: Option<&Path>) -> Result<PathBuf> {
        let rows = self.output_rows()?;

        let output_file = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.default_table_path());
        if let Some(parent) = output_file.parent() {
            create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(&output_file)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!(
            "Wrote {} mutations for {} to {}",
            rows.len(),
            self.sample_id,
            output_file.display()
        );
        Ok(output_file)
    }
}

///
/// A folder of breseq output folders.
///
pub struct IsolateSet {
    pub path: PathBuf,
    pub output_folder: PathBuf,
    pub samples: Vec<Isolate>,
}

impl IsolateSet {
    ///
    /// Open every sub-folder as an [Isolate]. A folder that is not a usable
    /// breseq output is logged and left out.
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<IsolateSet> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(GenomeDiffError::NotADirectory(path.display().to_string()));
        }

        let output_folder = path.join(ISOLATE_SET_OUTPUT_FOLDER);
        create_dir_all(&output_folder)?;

        let mut folders: Vec<PathBuf> = read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_dir() && *p != output_folder)
            .collect();
        folders.sort();

        let mut samples = Vec::new();
        for folder in folders {
            match Isolate::open(&folder) {
                Ok(isolate) => samples.push(isolate),
                Err(e) => warn!("Skipping {}: {}", folder.display(), e),
            }
        }

        info!("Opened {} isolates in {}", samples.len(), path.display());

        Ok(IsolateSet {
            path: path.to_path_buf(),
            output_folder,
            samples,
        })
    }

    ///
    /// Write every isolate's table to its default location. Failing isolates
    /// are logged and skipped.
    ///
    pub fn generate_tables(&self) -> Vec<PathBuf> {
        let bar = ProgressBar::new(self.samples.len() as u64);

        let mut tables = Vec::new();
        for sample in &self.samples {
            match sample.generate_output_table(None) {
                Ok(table) => tables.push(table),
                Err(e) => warn!("No table for {}: {}", sample.sample_id, e),
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        tables
    }

    ///
    /// Concatenate the per-isolate tables into
    /// `isolate_set_output/isolate_set_combined_table.tsv`, keeping one header.
    ///
    pub fn combine_isolate_tables(&self) -> Result<PathBuf> {
        let output_filename = self.output_folder.join(COMBINED_TABLE_NAME);
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(&output_filename)?;

        let mut header_written = false;
        for sample in &self.samples {
            let table = sample.default_table_path();
            if !table.is_file() {
                warn!("No table found for {} at {}", sample.sample_id, table.display());
                continue;
            }

            let mut reader = ReaderBuilder::new().delimiter(b'\t').from_path(&table)?;
            if !header_written {
                writer.write_record(reader.headers()?)?;
                header_written = true;
            }
            for record in reader.records() {
                writer.write_record(&record?)?;
            }
        }
        writer.flush()?;

        Ok(output_filename)
    }
}
