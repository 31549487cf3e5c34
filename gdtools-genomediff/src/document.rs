use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use gdtools_core::SequenceLookup;
use gdtools_core::utils::read_to_string;
use log::debug;

use crate::errors::{GenomeDiffError, Result};
use crate::models::{ExportEntry, Record, RecordKind};
use crate::schema::{LineKind, classify};
use crate::vcf::VcfRecord;

///
/// A parsed genome-diff file: its mutations and evidence in file order, plus
/// lookup indices built once at parse time.
///
/// The document is read-only after construction.
///
#[derive(Debug, Clone)]
pub struct GenomeDiffDocument {
    path: Option<PathBuf>,
    metadata: BTreeMap<String, Vec<String>>,
    mutations: Vec<Record>,
    evidence: Vec<Record>,
    ignored_lines: usize,
    mutation_map: HashMap<(String, u64), usize>,
    evidence_map: HashMap<String, usize>,
}

impl TryFrom<&Path> for GenomeDiffDocument {
    type Error = GenomeDiffError;

    ///
    /// Create a new [GenomeDiffDocument] from a `.gd` (or `.gd.gz`) file.
    ///
    /// # Arguments:
    /// - value: path to the genome-diff file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        let contents = read_to_string(value)?;
        let mut document = GenomeDiffDocument::from_text(&contents)?;
        document.path = Some(value.to_path_buf());

        debug!(
            "Parsed {} mutations and {} evidence records from {}",
            document.mutations.len(),
            document.evidence.len(),
            value.display()
        );

        Ok(document)
    }
}

impl TryFrom<&str> for GenomeDiffDocument {
    type Error = GenomeDiffError;

    fn try_from(value: &str) -> Result<Self> {
        GenomeDiffDocument::try_from(Path::new(value))
    }
}

impl TryFrom<String> for GenomeDiffDocument {
    type Error = GenomeDiffError;

    fn try_from(value: String) -> Result<Self> {
        GenomeDiffDocument::try_from(Path::new(&value))
    }
}

impl GenomeDiffDocument {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        GenomeDiffDocument::try_from(path.as_ref())
    }

    ///
    /// Parse genome-diff text already held in memory.
    ///
    /// Lines are split on `\n` and then on `\t`. Mutation and evidence lines
    /// are parsed into records; `#=KEY value` lines become metadata; every
    /// other non-empty line is counted as ignored.
    ///
    pub fn from_text(text: &str) -> Result<Self> {
        let mut metadata: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut mutations = Vec::new();
        let mut evidence = Vec::new();
        let mut ignored_lines = 0;

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let tokens: Vec<&str> = line.split('\t').collect();

            match classify(&tokens) {
                LineKind::Mutation => {
                    mutations.push(Record::from_tokens(&tokens, RecordKind::Mutation)?)
                }
                LineKind::Evidence => {
                    evidence.push(Record::from_tokens(&tokens, RecordKind::Evidence)?)
                }
                LineKind::Ignored => {
                    if line.is_empty() {
                        continue;
                    }
                    if let Some(header) = line.strip_prefix("#=") {
                        let (key, value) = header
                            .split_once(|c: char| c.is_whitespace())
                            .unwrap_or((header, ""));
                        metadata
                            .entry(key.to_string())
                            .or_default()
                            .push(value.trim().to_string());
                    }
                    ignored_lines += 1;
                }
            }
        }

        // later duplicates overwrite earlier entries
        let mutation_map = mutations
            .iter()
            .enumerate()
            .filter_map(|(index, m)| m.position.map(|p| ((m.seq_id().to_string(), p), index)))
            .collect();
        let evidence_map = evidence
            .iter()
            .enumerate()
            .map(|(index, e)| (e.id.clone(), index))
            .collect();

        Ok(GenomeDiffDocument {
            path: None,
            metadata,
            mutations,
            evidence,
            ignored_lines,
            mutation_map,
            evidence_map,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// `#=KEY value` header lines; a key repeated in the file keeps every value.
    pub fn metadata(&self) -> &BTreeMap<String, Vec<String>> {
        &self.metadata
    }

    pub fn mutations(&self) -> &[Record] {
        &self.mutations
    }

    pub fn evidence(&self) -> &[Record] {
        &self.evidence
    }

    /// Non-empty lines that were neither mutations nor evidence.
    pub fn ignored_lines(&self) -> usize {
        self.ignored_lines
    }

    ///
    /// Index of the mutation at `(seq_id, position)`, if any.
    ///
    pub fn lookup(&self, seq_id: &str, position: u64) -> Option<usize> {
        self.mutation_map
            .get(&(seq_id.to_string(), position))
            .copied()
    }

    pub fn get_evidence(&self, id: &str) -> Option<&Record> {
        self.evidence_map.get(id).map(|&index| &self.evidence[index])
    }

    ///
    /// The evidence records a mutation cites, in `parent_ids` order.
    ///
    /// Fails with [GenomeDiffError::MissingEvidence] on the first parent id
    /// that is not an evidence id of this document.
    ///
    pub fn resolve_evidence(&self, mutation: &Record) -> Result<Vec<&Record>> {
        mutation
            .parent_ids
            .iter()
            .map(|id| {
                self.get_evidence(id)
                    .ok_or_else(|| GenomeDiffError::MissingEvidence {
                        mutation: mutation.id.clone(),
                        evidence: id.clone(),
                    })
            })
            .collect()
    }

    ///
    /// Convert every mutation, in document order, to a VCF record.
    ///
    /// The first mutation that cannot be converted (unknown `seq_id`,
    /// unsupported type, span outside the reference) aborts the export.
    ///
    /// # Arguments
    /// - reference: sequences keyed by `seq_id`
    pub fn to_vcf<R: SequenceLookup + ?Sized>(&self, reference: &R) -> Result<Vec<VcfRecord>> {
        self.mutations
            .iter()
            .map(|mutation| {
                let sequence = reference
                    .sequence(mutation.seq_id())
                    .ok_or_else(|| GenomeDiffError::MissingReference(mutation.seq_id().to_string()))?;
                mutation.to_vcf(sequence)
            })
            .collect()
    }

    ///
    /// Mutation id -> flattened mutation plus its flattened evidence, the
    /// structure written by the YAML/JSON exporters.
    ///
    pub fn to_export_map(&self) -> Result<BTreeMap<String, ExportEntry>> {
        let mut data = BTreeMap::new();
        for mutation in &self.mutations {
            let evidence = self
                .resolve_evidence(mutation)?
                .into_iter()
                .map(|e| e.to_flat_map())
                .collect();

            data.insert(
                mutation.id.clone(),
                ExportEntry {
                    evidence,
                    mutation: mutation.to_flat_map(),
                },
            );
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn document() -> GenomeDiffDocument {
        let text = "#=GENOME_DIFF\t1.0\n\
                    SNP\t1\t10\tchr1\t5\tG\n\
                    SNP\t2\t10\tchr1\t5\tT\n\
                    DEL\t3\t11,10\tchr1\t8\t2\n\
                    \n\
                    RA\t10\t.\tchr1\t5\t0\tA\tG\n\
                    MC\t11\t.\tchr1\t8\t9\t0\t0\n";
        GenomeDiffDocument::from_text(text).unwrap()
    }

    #[rstest]
    fn test_partition(document: GenomeDiffDocument) {
        assert_eq!(document.mutations().len(), 3);
        assert_eq!(document.evidence().len(), 2);
        assert_eq!(document.ignored_lines(), 1);
        assert_eq!(document.metadata()["GENOME_DIFF"], vec!["1.0"]);
    }

    #[rstest]
    fn test_duplicate_key_overwrites(document: GenomeDiffDocument) {
        assert_eq!(document.lookup("chr1", 5), Some(1));
        assert_eq!(document.lookup("chr1", 8), Some(2));
        assert_eq!(document.lookup("chr1", 6), None);
        assert_eq!(document.lookup("chr2", 5), None);
    }

    #[rstest]
    fn test_resolve_keeps_parent_order(document: GenomeDiffDocument) {
        let deletion = &document.mutations()[2];
        let ids: Vec<&str> = document
            .resolve_evidence(deletion)
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["11", "10"]);
    }

    #[rstest]
    fn test_missing_evidence_is_an_error() {
        let document = GenomeDiffDocument::from_text("SNP\t1\t99\tchr1\t5\tG\n").unwrap();
        let result = document.resolve_evidence(&document.mutations()[0]);
        assert!(matches!(
            result,
            Err(GenomeDiffError::MissingEvidence { mutation, evidence }) if mutation == "1" && evidence == "99"
        ));
        assert!(document.to_export_map().is_err());
    }

    #[rstest]
    fn test_unknown_type_aborts_parse() {
        let result = GenomeDiffDocument::from_text("SNP\t1\t.\tchr1\t5\tG\nQQ\t2\t.\n");
        assert!(matches!(result, Err(GenomeDiffError::UnknownRecordType(t)) if t == "QQ"));
    }

    #[rstest]
    fn test_crlf_lines() {
        let document = GenomeDiffDocument::from_text("SNP\t1\t.\tchr1\t5\tG\r\n").unwrap();
        assert_eq!(document.mutations()[0].new_seq(), "G");
    }

    #[rstest]
    fn test_missing_reference_aborts_export(document: GenomeDiffDocument) {
        let reference: HashMap<String, String> = HashMap::new();
        let result = document.to_vcf(&reference);
        assert!(matches!(result, Err(GenomeDiffError::MissingReference(s)) if s == "chr1"));
    }
}
