use std::collections::HashMap;
use std::path::Path;

use bio::io::fasta;

use crate::errors::ReferenceError;
use crate::utils::get_dynamic_reader;

///
/// Anything that can hand out the raw bases of a reference sequence by its id.
///
/// Sequences are returned whole; callers translate their own 1-based
/// coordinates into slice indices.
///
pub trait SequenceLookup {
    fn sequence(&self, seq_id: &str) -> Option<&[u8]>;
}

impl SequenceLookup for HashMap<String, Vec<u8>> {
    fn sequence(&self, seq_id: &str) -> Option<&[u8]> {
        self.get(seq_id).map(|s| s.as_slice())
    }
}

impl SequenceLookup for HashMap<String, String> {
    fn sequence(&self, seq_id: &str) -> Option<&[u8]> {
        self.get(seq_id).map(|s| s.as_bytes())
    }
}

///
/// A reference genome held in memory, keyed by FASTA record id.
///
#[derive(Debug, Clone, Default)]
pub struct GenomeAssembly {
    seq_map: HashMap<String, Vec<u8>>,
}

impl TryFrom<&str> for GenomeAssembly {
    type Error = ReferenceError;

    fn try_from(value: &str) -> Result<Self, ReferenceError> {
        GenomeAssembly::try_from(Path::new(value))
    }
}

impl TryFrom<String> for GenomeAssembly {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, ReferenceError> {
        GenomeAssembly::try_from(Path::new(&value))
    }
}

impl TryFrom<&Path> for GenomeAssembly {
    type Error = ReferenceError;

    ///
    /// Create a new [GenomeAssembly] from a (optionally gzip'd) fasta file
    ///
    fn try_from(value: &Path) -> Result<GenomeAssembly, ReferenceError> {
        let reader = get_dynamic_reader(value)?;
        let genome = fasta::Reader::new(reader);

        let mut seq_map: HashMap<String, Vec<u8>> = HashMap::new();
        for record in genome.records() {
            match record {
                Ok(record) => {
                    seq_map.insert(record.id().to_string(), record.seq().to_owned());
                }
                Err(e) => {
                    return Err(ReferenceError::FastaReadError {
                        path: value.display().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if seq_map.is_empty() {
            return Err(ReferenceError::EmptyReference(value.display().to_string()));
        }

        Ok(GenomeAssembly { seq_map })
    }
}

impl<K: Into<String>, V: Into<Vec<u8>>> FromIterator<(K, V)> for GenomeAssembly {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let seq_map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        GenomeAssembly { seq_map }
    }
}

impl GenomeAssembly {
    pub fn contains_chr(&self, chr: &str) -> bool {
        self.seq_map.contains_key(chr)
    }

    /// Sequence ids, sorted.
    pub fn sequence_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.seq_map.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

impl SequenceLookup for GenomeAssembly {
    fn sequence(&self, seq_id: &str) -> Option<&[u8]> {
        self.seq_map.get(seq_id).map(|s| s.as_slice())
    }
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
            .join("../tests/data/genomediff")
            .join(file_name)
    }

    #[rstest]
    fn test_open_reference_from_path() {
        let assembly = GenomeAssembly::try_from(get_test_path("reference.fasta").as_path()).unwrap();

        assert_eq!(assembly.sequence_ids(), vec!["chr1", "plasmid1"]);
        assert_eq!(&assembly.sequence("chr1").unwrap()[..8], b"ACGTAAAC");
        assert!(assembly.contains_chr("plasmid1"));
        assert!(!assembly.contains_chr("chr2"));
    }

    #[rstest]
    fn test_missing_reference_file() {
        let result = GenomeAssembly::try_from("../tests/data/genomediff/missing.fasta");
        assert!(matches!(result, Err(ReferenceError::Io(_))));
    }

    #[rstest]
    fn test_empty_reference_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.fasta");
        std::fs::write(&path, "").unwrap();

        let result = GenomeAssembly::try_from(path.as_path());
        assert!(matches!(result, Err(ReferenceError::EmptyReference(_))));
    }

    #[rstest]
    fn test_lookup_from_map() {
        let mut map: HashMap<String, String> = HashMap::new();
        map.insert("chr1".to_string(), "ACGT".to_string());

        assert_eq!(map.sequence("chr1"), Some(b"ACGT".as_slice()));
        assert_eq!(map.sequence("chr2"), None);

        let assembly: GenomeAssembly = vec![("chr1", "ACGT")].into_iter().collect();
        assert_eq!(assembly.sequence("chr1"), Some(b"ACGT".as_slice()));
    }
}
