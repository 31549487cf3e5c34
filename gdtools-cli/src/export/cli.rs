use clap::{Command, arg};

pub const EXPORT_CMD: &str = "export";

pub fn create_export_cli() -> Command {
    Command::new(EXPORT_CMD)
        .about("Export each mutation with its supporting evidence as YAML or JSON.")
        .arg(
            arg!(--gd <GD>)
                .required(true)
                .help("Path to the genome-diff (.gd) file"),
        )
        .arg(
            arg!(--output <FILE>)
                .required(true)
                .help("Output file; .yaml/.yml writes YAML, anything else JSON"),
        )
}
