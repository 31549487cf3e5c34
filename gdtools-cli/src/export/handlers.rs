use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use gdtools_genomediff::GenomeDiffDocument;
use gdtools_io::GenomeDiffWrite;

pub fn run_export(matches: &ArgMatches) -> Result<()> {
    let gd_path = matches
        .get_one::<String>("gd")
        .expect("--gd is required");
    let output_path = matches
        .get_one::<String>("output")
        .expect("--output is required");

    let document = GenomeDiffDocument::from_path(gd_path)
        .with_context(|| format!("Failed to parse genome-diff file: {}", gd_path))?;

    document
        .write_table(output_path)
        .with_context(|| format!("Failed to write {}", output_path))?;

    info!(
        "Exported {} mutations to {}",
        document.mutations().len(),
        output_path
    );
    Ok(())
}
