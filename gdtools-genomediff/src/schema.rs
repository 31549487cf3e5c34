//! Record layout of the genome-diff format.
//!
//! Every line is tab separated. The first three columns are always the record
//! type, the record id and the comma separated parent (evidence) ids. The
//! remaining positional columns depend on the record type and are listed in
//! [SCHEMAS]. Free-form `key=value` annotations may follow, and are picked up
//! from anywhere on the line by [named_fields].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Columns shared by every record, ahead of the type specific ones.
pub const COMMON_FIELDS: [&str; 3] = ["type", "id", "parent_id"];

/// Positional fields whose values are parsed as integers.
pub const INTEGER_FIELDS: [&str; 2] = ["position", "size"];

/// Type tag -> ordered positional field names.
pub static SCHEMAS: &[(&str, &[&str])] = &[
    // mutations
    ("SNP", &["seq_id", "position", "new_seq"]),
    ("SUB", &["seq_id", "position", "size", "new_seq"]),
    ("DEL", &["seq_id", "position", "size"]),
    ("INS", &["seq_id", "position", "new_seq"]),
    (
        "MOB",
        &["seq_id", "position", "repeat_name", "strand", "duplication_size"],
    ),
    ("AMP", &["seq_id", "position", "size", "new_copy_number"]),
    ("CON", &["seq_id", "position", "size", "region"]),
    ("INV", &["seq_id", "position", "size"]),
    // evidence
    (
        "RA",
        &["seq_id", "position", "insert_position", "ref_base", "new_base"],
    ),
    ("MC", &["seq_id", "start", "end", "start_range", "end_range"]),
    (
        "JC",
        &[
            "side_1_seq_id",
            "side_1_position",
            "side_1_strand",
            "side_2_seq_id",
            "side_2_position",
            "side_2_strand",
            "overlap",
        ],
    ),
    ("UN", &["seq_id", "start", "end"]),
    // validation
    ("CURA", &["expert"]),
    ("FPOS", &["expert"]),
    ("PHYL", &["gd"]),
    (
        "TSEQ",
        &["seq_id", "primer1_start", "primer1_end", "primer2_start", "primer2_end"],
    ),
    (
        "PFLP",
        &["seq_id", "primer1_start", "primer1_end", "primer2_start", "primer2_end"],
    ),
    (
        "RFLP",
        &[
            "seq_id",
            "primer1_start",
            "primer1_end",
            "primer2_start",
            "primer2_end",
            "enzyme",
        ],
    ),
    ("PFGE", &["seq_id", "restriction_enzyme"]),
    ("NOTE", &["note"]),
];

static NAMED_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)=([^\t]+)").unwrap());

/// What a single line of a genome-diff file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Mutation,
    Evidence,
    Ignored,
}

/// Positional field names for a record type, without the common columns.
pub fn fields_for(record_type: &str) -> Option<&'static [&'static str]> {
    SCHEMAS
        .iter()
        .find(|(tag, _)| *tag == record_type)
        .map(|(_, fields)| *fields)
}

pub fn is_integer_field(name: &str) -> bool {
    INTEGER_FIELDS.contains(&name)
}

///
/// Decide what a tokenized line is, from the length of its first token alone:
/// three characters is a mutation, two is evidence, anything else is ignored.
///
pub fn classify(tokens: &[&str]) -> LineKind {
    match tokens.first().map(|t| t.chars().count()) {
        Some(3) => LineKind::Mutation,
        Some(2) => LineKind::Evidence,
        _ => LineKind::Ignored,
    }
}

///
/// Collect `key=value` annotations from every token of a line.
///
/// Tokens are searched, not anchored, so a token matches wherever it holds a
/// `word=value` shape, including among the positional columns. A key seen
/// twice keeps its last value.
///
pub fn named_fields(tokens: &[&str]) -> BTreeMap<String, String> {
    tokens
        .iter()
        .filter_map(|token| NAMED_FIELD.captures(token))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}
