use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use gdtools_core::SequenceLookup;
use gdtools_core::utils::is_gzipped;
use gdtools_genomediff::{GenomeDiffDocument, VcfRecord};

use crate::error::Result;

/// Render VCF records one per line, each line newline terminated.
pub fn render_vcf(records: &[VcfRecord]) -> String {
    records.iter().map(|r| format!("{}\n", r)).collect()
}

/// Whether a path asks for YAML rather than JSON output.
pub fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn create_with_parents(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

pub trait GenomeDiffWrite {
    ///
    /// Convert all mutations to VCF and write them to disk, gzip'd when the
    /// path ends in `.gz`. Returns the converted records.
    ///
    /// # Arguments
    /// - reference: sequences keyed by `seq_id`
    /// - path: the path to the file to dump to
    fn write_vcf<R: SequenceLookup + ?Sized, T: AsRef<Path>>(
        &self,
        reference: &R,
        path: T,
    ) -> Result<Vec<VcfRecord>>;

    ///
    /// Write the mutation -> evidence map as block-style YAML
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_yaml<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    ///
    /// Write the mutation -> evidence map as sorted-key JSON, indented by 4 spaces
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_json<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    ///
    /// Write YAML for `.yaml`/`.yml` paths, JSON for anything else.
    ///
    fn write_table<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        match is_yaml_path(path.as_ref()) {
            true => self.write_yaml(path),
            false => self.write_json(path),
        }
    }
}

impl GenomeDiffWrite for GenomeDiffDocument {
    fn write_vcf<R: SequenceLookup + ?Sized, T: AsRef<Path>>(
        &self,
        reference: &R,
        path: T,
    ) -> Result<Vec<VcfRecord>> {
        let path = path.as_ref();
        let records = self.to_vcf(reference)?;
        let text = render_vcf(&records);

        let file = create_with_parents(path)?;
        if is_gzipped(path) {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
            encoder.write_all(text.as_bytes())?;
            encoder.finish()?;
        } else {
            let mut writer = BufWriter::new(file);
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
        }

        Ok(records)
    }

    fn write_yaml<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let data = self.to_export_map()?;
        let file = create_with_parents(path.as_ref())?;
        serde_yaml::to_writer(BufWriter::new(file), &data)?;
        Ok(())
    }

    fn write_json<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let data = self.to_export_map()?;
        let file = create_with_parents(path.as_ref())?;

        let mut writer = BufWriter::new(file);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        data.serialize(&mut serializer)?;
        writer.flush()?;
        Ok(())
    }
}
