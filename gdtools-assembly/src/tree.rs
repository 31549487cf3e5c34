use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::{AssemblyReportError, Result};
use crate::report::AssemblyReport;

pub const LABELED_TREE_EXTENSION: &str = "labeled.treefile";

///
/// Map tree leaf ids (`{refseq accession}_{assembly name}`) to readable
/// `{organism}|{strain}` labels. Parentheses are dropped from the label since
/// newick treats them as structure.
///
pub fn label_map(reports: &[AssemblyReport]) -> Vec<(String, String)> {
    reports
        .iter()
        .map(|report| {
            let metadata = &report.metadata;
            let field = |v: &Option<String>| v.clone().unwrap_or_default();

            let key = format!(
                "{}_{}",
                field(&metadata.refseq_assembly_accession),
                field(&metadata.assembly_name)
            );
            let value = format!(
                "{}|{}",
                field(&metadata.organism_name),
                field(&metadata.infraspecific_name)
            )
            .replace(['(', ')'], "");

            (key, value)
        })
        .collect()
}

/// Apply the label map to a newick string, in map order.
pub fn relabel(contents: &str, labels: &[(String, String)]) -> String {
    let mut contents = contents.to_string();
    for (key, value) in labels {
        info!("Replacing '{}' with '{}'", key, value);
        contents = contents.replace(key.as_str(), value);
    }
    contents
}

///
/// Rewrite a tree file with leaf ids replaced by organism/strain labels.
///
/// # Arguments
/// - tree_path: path to the newick tree, e.g. `nasp_quickbb.treefile`
/// - reports: the assembly reports of the genomes in the tree
///
/// # Returns
/// The path to the relabeled tree, `<stem>.labeled.treefile` beside the input.
pub fn relabel_tree<P: AsRef<Path>>(tree_path: P, reports: &[AssemblyReport]) -> Result<PathBuf> {
    let tree_path = tree_path.as_ref();
    if !tree_path.is_file() {
        return Err(AssemblyReportError::InvalidTreePath(
            tree_path.display().to_string(),
        ));
    }

    let contents = fs::read_to_string(tree_path)?;
    let relabeled = relabel(&contents, &label_map(reports));

    let output_file = tree_path.with_extension(LABELED_TREE_EXTENSION);
    fs::write(&output_file, relabeled)?;
    info!("Wrote content to {}", output_file.display());

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn path_to_data() -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/assembly")
    }

    #[fixture]
    fn reports() -> Vec<AssemblyReport> {
        [
            "GCF_002223045.1_ASM222304v1_assembly_report.txt",
            "GCF_000001234.2_ASM1234v2_assembly_report.txt",
        ]
        .iter()
        .map(|name| AssemblyReport::from_path(path_to_data().join(name)).unwrap())
        .collect()
    }

    #[rstest]
    fn test_label_map(reports: Vec<AssemblyReport>) {
        let labels = label_map(&reports);
        assert_eq!(
            labels,
            vec![
                (
                    "GCF_002223045.1_ASM222304v1".to_string(),
                    "Burkholderia sp. HI4860 b-proteobacteria|strain=HI4860".to_string()
                ),
                (
                    "GCF_000001234.2_ASM1234v2".to_string(),
                    "Burkholderia cepacia b-proteobacteria|strain=ATCC 25416".to_string()
                ),
            ]
        );
    }

    #[rstest]
    fn test_label_map_missing_fields() {
        let report = AssemblyReport::from_text("empty", "# Assembly name: ASM9v1\n");
        assert_eq!(
            label_map(&[report]),
            vec![("_ASM9v1".to_string(), "|".to_string())]
        );
    }

    #[rstest]
    fn test_relabel_tree(reports: Vec<AssemblyReport>) {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("nasp_quickbb.treefile");
        fs::copy(path_to_data().join("nasp_quickbb.treefile"), &tree).unwrap();

        let output = relabel_tree(&tree, &reports).unwrap();
        assert_eq!(output, dir.path().join("nasp_quickbb.labeled.treefile"));

        let contents = fs::read_to_string(output).unwrap();
        assert_eq!(
            contents.trim_end(),
            "((Burkholderia sp. HI4860 b-proteobacteria|strain=HI4860:0.01,\
             Burkholderia cepacia b-proteobacteria|strain=ATCC 25416:0.02)100:0.5,Reference:0.1);"
        );
    }

    #[rstest]
    fn test_relabel_missing_tree(reports: Vec<AssemblyReport>) {
        let result = relabel_tree(path_to_data().join("missing.treefile"), &reports);
        assert!(matches!(result, Err(AssemblyReportError::InvalidTreePath(_))));
    }
}
