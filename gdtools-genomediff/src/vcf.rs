//! Conversion of genome-diff mutations to VCF records.
//!
//! Genome-diff positions are 1-based and inclusive, the same convention VCF
//! uses, so positions are carried over unchanged and only the allele strings
//! have to be cut from the reference sequence.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::errors::{GenomeDiffError, Result};
use crate::models::Record;

/// A single, header-less VCF data line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VcfRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: String,
    pub filter: String,
    pub info: Vec<String>,
}

impl Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = if self.info.is_empty() {
            ".".to_string()
        } else {
            self.info.join(";")
        };
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id,
            self.ref_allele,
            self.alt_allele,
            self.qual,
            self.filter,
            info
        )
    }
}

///
/// Build the INFO column: `key=value` tokens sorted by key, with all
/// whitespace removed from each token.
///
pub fn format_info(entries: &[(&str, String)]) -> Vec<String> {
    let mut entries: Vec<&(&str, String)> = entries.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(key, value)| {
            format!("{}={}", key, value)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
        })
        .collect()
}

impl Record {
    fn require_position(&self) -> Result<u64> {
        self.position.ok_or_else(|| GenomeDiffError::MissingField {
            id: self.id.clone(),
            field: "position".to_string(),
        })
    }

    fn require_size(&self) -> Result<u64> {
        self.size.ok_or_else(|| GenomeDiffError::MissingField {
            id: self.id.clone(),
            field: "size".to_string(),
        })
    }

    /// Reference bases for the 1-based span `[start, start + len)`.
    fn reference_span(&self, reference: &[u8], start: u64, len: u64) -> Result<String> {
        let out_of_bounds = || GenomeDiffError::PositionOutOfBounds {
            seq_id: self.seq_id().to_string(),
            start,
            end: start.saturating_add(len),
            length: reference.len(),
        };

        let end = start.checked_add(len).ok_or_else(out_of_bounds)?;
        let first = usize::try_from(start).map_err(|_| out_of_bounds())?;
        let last = usize::try_from(end).map_err(|_| out_of_bounds())?;
        if first == 0 || last - 1 > reference.len() {
            return Err(out_of_bounds());
        }

        let span = &reference[first - 1..last - 1];
        Ok(String::from_utf8_lossy(span).into_owned())
    }

    ///
    /// Express this mutation as a VCF record against the sequence it sits on.
    ///
    /// Only SNP, INS, SUB, DEL and INV have a VCF form; any other type fails
    /// with [GenomeDiffError::UnsupportedMutationType].
    ///
    /// # Arguments
    /// - reference: the full sequence named by this mutation's `seq_id`
    pub fn to_vcf(&self, reference: &[u8]) -> Result<VcfRecord> {
        let (ref_allele, alt_allele) = match self.record_type.as_str() {
            "SNP" => {
                let base = self.reference_span(reference, self.require_position()?, 1)?;
                (base, self.new_seq().to_string())
            }
            // anchored on the base at `position`, not left-normalized
            "INS" => {
                let base = self.reference_span(reference, self.require_position()?, 1)?;
                let alt = format!("{}{}", base, self.new_seq());
                (base, alt)
            }
            "SUB" => {
                let span =
                    self.reference_span(reference, self.require_position()?, self.require_size()?)?;
                (span, self.new_seq().to_string())
            }
            "DEL" => {
                let span =
                    self.reference_span(reference, self.require_position()?, self.require_size()?)?;
                (span, ".".to_string())
            }
            "INV" => {
                let span =
                    self.reference_span(reference, self.require_position()?, self.require_size()?)?;
                let reversed: String = span.chars().rev().collect();
                (span, reversed)
            }
            other => return Err(GenomeDiffError::UnsupportedMutationType(other.to_string())),
        };

        let mut info = vec![
            ("TP", self.record_type.clone()),
            ("P", self.parent_ids.len().to_string()),
        ];
        if let Some(gene_position) = self.get("gene_position") {
            info.push(("GP", gene_position.to_string()));
        }
        if let Some(category) = self.get("mutation_category") {
            info.push(("CAT", category.to_string()));
        }

        Ok(VcfRecord {
            chrom: self.seq_id().to_string(),
            pos: self.require_position()?,
            id: ".".to_string(),
            ref_allele,
            alt_allele,
            qual: ".".to_string(),
            filter: "PASS".to_string(),
            info: format_info(&info),
        })
    }
}
