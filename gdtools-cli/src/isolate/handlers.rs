use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use gdtools_genomediff::{Isolate, IsolateSet};

pub fn run_isolate(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("path")
        .expect("--path is required");
    let output = matches.get_one::<String>("output").map(Path::new);

    let isolate =
        Isolate::open(path).with_context(|| format!("Failed to open breseq folder: {}", path))?;
    let table = isolate.generate_output_table(output)?;

    println!("{}", table.display());
    Ok(())
}

pub fn run_isolate_set(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("path")
        .expect("--path is required");

    let set = IsolateSet::open(path)
        .with_context(|| format!("Failed to open isolate set folder: {}", path))?;

    let tables = set.generate_tables();
    info!("Generated {} of {} isolate tables", tables.len(), set.samples.len());

    let combined = set.combine_isolate_tables()?;
    println!("{}", combined.display());
    Ok(())
}
