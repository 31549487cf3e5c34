use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use gdtools_fastq::concat::default_output_folder;
use gdtools_fastq::{ConcatOptions, run};

pub fn run_concat_fastq(matches: &ArgMatches) -> Result<()> {
    let sheet = matches
        .get_one::<String>("sheet")
        .expect("--sheet is required");
    let dmux = matches
        .get_one::<String>("dmux")
        .expect("--dmux is required");

    let output = match matches.get_one::<String>("output") {
        Some(p) => PathBuf::from(p),
        None => default_output_folder()?,
    };

    let mut options = ConcatOptions::new(PathBuf::from(sheet), PathBuf::from(dmux), output);
    if let Some(runs) = matches.get_many::<String>("runs") {
        options = options.with_runs(runs.cloned().collect());
    }

    let written = run(&options)
        .with_context(|| format!("Failed to concatenate FASTQ files for {}", sheet))?;
    info!(
        "Wrote {} files to {}",
        written.len(),
        options.output.display()
    );

    Ok(())
}
