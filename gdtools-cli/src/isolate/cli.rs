use clap::{Command, arg};

pub const ISOLATE_CMD: &str = "isolate";
pub const ISOLATE_SET_CMD: &str = "isolate-set";

pub fn create_isolate_cli() -> Command {
    Command::new(ISOLATE_CMD)
        .about("Write the mutation table of a single breseq output folder.")
        .arg(
            arg!(--path <DIR>)
                .required(true)
                .help("breseq output folder (holds output/evidence/annotated.gd)"),
        )
        .arg(
            arg!(--output <TSV>)
                .required(false)
                .help("Output table (default: <DIR>/sample_output/annotated_table.tsv)"),
        )
}

pub fn create_isolate_set_cli() -> Command {
    Command::new(ISOLATE_SET_CMD)
        .about("Write per-isolate tables for a folder of breseq runs and combine them.")
        .arg(
            arg!(--path <DIR>)
                .required(true)
                .help("Folder whose sub-folders are breseq output folders"),
        )
}
