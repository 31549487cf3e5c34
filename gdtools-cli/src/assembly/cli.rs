use clap::{Arg, ArgGroup, Command, arg};

pub const ASSEMBLY_CMD: &str = "assembly";
pub const RELABEL_CMD: &str = "relabel";

pub fn create_assembly_cli() -> Command {
    Command::new(ASSEMBLY_CMD)
        .about("Print the metadata of an NCBI assembly report.")
        .arg(
            arg!(--report <FILE>)
                .required(true)
                .help("Path to a *_assembly_report.txt file"),
        )
        .arg(
            arg!(--format <FORMAT>)
                .required(false)
                .value_parser(["yaml", "json"])
                .default_value("yaml")
                .help("Output format"),
        )
}

pub fn create_relabel_cli() -> Command {
    Command::new(RELABEL_CMD)
        .about("Replace <accession>_<assembly> leaf names in a tree with organism and strain labels.")
        .arg(
            arg!(--tree <TREE>)
                .required(true)
                .help("Path to the newick tree file"),
        )
        .arg(
            Arg::new("reports")
                .long("reports")
                .num_args(1..)
                .help("NCBI assembly report files"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .num_args(1..)
                .help("Glob patterns matching NCBI assembly report files"),
        )
        .group(
            ArgGroup::new("sources")
                .args(["reports", "pattern"])
                .required(true),
        )
}
