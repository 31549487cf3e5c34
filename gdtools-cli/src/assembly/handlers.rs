use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use glob::glob;
use log::info;

use gdtools_assembly::{AssemblyReport, relabel_tree};

pub fn run_assembly(matches: &ArgMatches) -> Result<()> {
    let report_path = matches
        .get_one::<String>("report")
        .expect("--report is required");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("yaml");

    let report = AssemblyReport::from_path(report_path)
        .with_context(|| format!("Failed to read assembly report: {}", report_path))?;

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&report.metadata)?,
        _ => serde_yaml::to_string(&report.metadata)?,
    };
    println!("{}", rendered.trim_end());

    Ok(())
}

/// Report paths from `--reports`, then from every `--pattern` match.
fn collect_report_paths(matches: &ArgMatches) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = matches
        .get_many::<String>("reports")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();

    if let Some(patterns) = matches.get_many::<String>("pattern") {
        for pattern in patterns {
            let mut matched = glob(pattern)
                .with_context(|| format!("Invalid glob pattern: {}", pattern))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            matched.sort();
            paths.extend(matched);
        }
    }

    Ok(paths)
}

pub fn run_relabel(matches: &ArgMatches) -> Result<()> {
    let tree_path = matches
        .get_one::<String>("tree")
        .expect("--tree is required");

    let reports = collect_report_paths(matches)?
        .iter()
        .map(|p| {
            AssemblyReport::from_path(p)
                .with_context(|| format!("Failed to read assembly report: {}", p.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("Loaded {} assembly reports", reports.len());

    let output = relabel_tree(tree_path, &reports)?;
    println!("{}", output.display());

    Ok(())
}
