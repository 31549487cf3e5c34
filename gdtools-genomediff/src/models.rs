//! Typed records parsed from genome-diff lines.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::errors::{GenomeDiffError, Result};
use crate::schema::{COMMON_FIELDS, fields_for, is_integer_field, named_fields};

/// Whether a record is a called mutation or a piece of supporting evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordKind {
    Mutation,
    Evidence,
}

/// A value in the flattened (YAML/JSON) form of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    List(Vec<String>),
}

/// One mutation with the evidence records it cites, as exported to YAML/JSON.
///
/// Field order matters: serializing yields keys in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportEntry {
    pub evidence: Vec<BTreeMap<String, FlatValue>>,
    pub mutation: BTreeMap<String, FlatValue>,
}

///
/// A single mutation or evidence line of a genome-diff file.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub kind: RecordKind,
    pub record_type: String,
    pub id: String,
    pub parent_ids: Vec<String>,
    /// Type specific positional columns, in schema order, as raw strings.
    pub fields: Vec<(String, String)>,
    pub named_fields: BTreeMap<String, String>,
    pub position: Option<u64>,
    pub size: Option<u64>,
}

impl Record {
    ///
    /// Build a record from the tab separated tokens of one line.
    ///
    /// Schema fields are zipped against the tokens by position; a short line
    /// leaves the trailing fields absent.
    ///
    /// # Arguments
    /// - tokens: the tokens of the line, type tag first
    /// - kind: what the classifier decided the line is
    pub fn from_tokens(tokens: &[&str], kind: RecordKind) -> Result<Record> {
        let record_type = tokens.first().copied().unwrap_or_default();
        let schema = fields_for(record_type)
            .ok_or_else(|| GenomeDiffError::UnknownRecordType(record_type.to_string()))?;

        let id = tokens
            .get(1)
            .ok_or_else(|| GenomeDiffError::MissingField {
                id: record_type.to_string(),
                field: "id".to_string(),
            })?
            .to_string();

        let parent_ids = tokens
            .get(2)
            .map(|p| {
                p.split(',')
                    .filter(|s| !s.is_empty() && *s != ".")
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let fields: Vec<(String, String)> = schema
            .iter()
            .zip(tokens.iter().skip(COMMON_FIELDS.len()))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let mut record = Record {
            kind,
            record_type: record_type.to_string(),
            id,
            parent_ids,
            fields,
            named_fields: named_fields(tokens),
            position: None,
            size: None,
        };

        record.position = record.integer_field("position")?;
        record.size = record.integer_field("size")?;

        Ok(record)
    }

    fn integer_field(&self, name: &str) -> Result<Option<u64>> {
        debug_assert!(is_integer_field(name));
        match self.field(name) {
            Some(value) if !value.is_empty() => {
                value
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| GenomeDiffError::InvalidInteger {
                        id: self.id.clone(),
                        field: name.to_string(),
                        value: value.to_string(),
                    })
            }
            _ => Ok(None),
        }
    }

    /// Positional field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Positional field by name, falling back to the named annotations.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.field(name)
            .or_else(|| self.named_fields.get(name).map(|v| v.as_str()))
    }

    pub fn seq_id(&self) -> &str {
        self.field("seq_id").unwrap_or_default()
    }

    pub fn new_seq(&self) -> &str {
        self.field("new_seq").unwrap_or_default()
    }

    pub fn is_mutation(&self) -> bool {
        self.kind == RecordKind::Mutation
    }

    ///
    /// Flatten the record into a single map: positional fields, then the
    /// common columns, then the named annotations (which win on clashes).
    ///
    pub fn to_flat_map(&self) -> BTreeMap<String, FlatValue> {
        let mut data: BTreeMap<String, FlatValue> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), FlatValue::Text(v.clone())))
            .collect();

        data.insert("type".to_string(), FlatValue::Text(self.record_type.clone()));
        data.insert("id".to_string(), FlatValue::Text(self.id.clone()));
        data.insert(
            "parent_id".to_string(),
            FlatValue::List(self.parent_ids.clone()),
        );

        for (k, v) in &self.named_fields {
            data.insert(k.clone(), FlatValue::Text(v.clone()));
        }

        data
    }
}

fn quoted_list<I: IntoIterator<Item = String>>(items: I) -> String {
    let items: Vec<String> = items.into_iter().map(|i| format!("'{}'", i)).collect();
    format!("[{}]", items.join(", "))
}

impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RecordKind::Mutation => "Mutation",
            RecordKind::Evidence => "Evidence",
        };
        let fields = quoted_list(self.fields.iter().map(|(k, v)| format!("{}={}", k, v)));
        let named = quoted_list(self.named_fields.iter().map(|(k, v)| format!("{}={}", k, v)));

        write!(
            f,
            "{}('{}', '{}', '{}', {}, {})",
            kind,
            self.record_type,
            self.id,
            self.parent_ids.join(","),
            fields,
            named
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn snp() -> Record {
        let tokens = [
            "SNP",
            "1",
            "10,11",
            "chr1",
            "5",
            "G",
            "gene_name=dnaA",
            "mutation_category=snp_synonymous",
        ];
        Record::from_tokens(&tokens, RecordKind::Mutation).unwrap()
    }

    #[rstest]
    fn test_positional_fields(snp: Record) {
        assert_eq!(snp.record_type, "SNP");
        assert_eq!(snp.id, "1");
        assert_eq!(snp.parent_ids, vec!["10", "11"]);
        assert_eq!(snp.seq_id(), "chr1");
        assert_eq!(snp.position, Some(5));
        assert_eq!(snp.size, None);
        assert_eq!(snp.new_seq(), "G");
        assert_eq!(snp.fields.len(), 3);
    }

    #[rstest]
    fn test_get_falls_back_to_named_fields(snp: Record) {
        assert_eq!(snp.get("position"), Some("5"));
        assert_eq!(snp.get("gene_name"), Some("dnaA"));
        assert_eq!(snp.get("locus_tag"), None);
    }

    #[rstest]
    fn test_short_line_leaves_fields_absent() {
        let record = Record::from_tokens(&["DEL", "3", "12", "chr1"], RecordKind::Mutation).unwrap();
        assert_eq!(record.seq_id(), "chr1");
        assert_eq!(record.position, None);
        assert_eq!(record.size, None);
        assert_eq!(record.field("size"), None);
    }

    #[rstest]
    fn test_dot_parent_means_no_parents() {
        let record = Record::from_tokens(
            &["RA", "10", ".", "chr1", "5", "0", "A", "G"],
            RecordKind::Evidence,
        )
        .unwrap();
        assert!(record.parent_ids.is_empty());
        assert_eq!(record.field("new_base"), Some("G"));
    }

    #[rstest]
    fn test_unknown_type() {
        let result = Record::from_tokens(&["XYZ", "1", "."], RecordKind::Mutation);
        assert!(matches!(result, Err(GenomeDiffError::UnknownRecordType(t)) if t == "XYZ"));
    }

    #[rstest]
    fn test_non_integer_position() {
        let result = Record::from_tokens(&["SNP", "1", "2", "chr1", "five", "G"], RecordKind::Mutation);
        assert!(matches!(
            result,
            Err(GenomeDiffError::InvalidInteger { field, .. }) if field == "position"
        ));
    }

    #[rstest]
    fn test_flat_map(snp: Record) {
        let flat = snp.to_flat_map();

        assert_eq!(flat["type"], FlatValue::Text("SNP".to_string()));
        assert_eq!(
            flat["parent_id"],
            FlatValue::List(vec!["10".to_string(), "11".to_string()])
        );
        assert_eq!(flat["position"], FlatValue::Text("5".to_string()));
        assert_eq!(flat["gene_name"], FlatValue::Text("dnaA".to_string()));
        assert_eq!(flat.len(), 8);
    }

    #[rstest]
    fn test_display(snp: Record) {
        assert_eq!(
            snp.to_string(),
            "Mutation('SNP', '1', '10,11', ['seq_id=chr1', 'position=5', 'new_seq=G'], \
             ['gene_name=dnaA', 'mutation_category=snp_synonymous'])"
        );
    }
}
