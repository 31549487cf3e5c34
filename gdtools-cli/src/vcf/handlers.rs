use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use gdtools_core::GenomeAssembly;
use gdtools_genomediff::GenomeDiffDocument;
use gdtools_io::{GenomeDiffWrite, render_vcf};

pub fn run_vcf(matches: &ArgMatches) -> Result<()> {
    let gd_path = matches
        .get_one::<String>("gd")
        .expect("--gd is required");
    let reference_path = matches
        .get_one::<String>("reference")
        .expect("--reference is required");
    let output_path = matches.get_one::<String>("output");

    let document = GenomeDiffDocument::from_path(gd_path)
        .with_context(|| format!("Failed to parse genome-diff file: {}", gd_path))?;
    let reference = GenomeAssembly::try_from(reference_path.as_str())
        .with_context(|| format!("Failed to load reference: {}", reference_path))?;

    let records = match output_path {
        Some(p) => {
            let records = document
                .write_vcf(&reference, p)
                .with_context(|| format!("Failed to write VCF: {}", p))?;
            info!("Wrote {} records to {}", records.len(), p);
            records
        }
        None => document.to_vcf(&reference)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(render_vcf(&records).as_bytes())?;

    Ok(())
}
