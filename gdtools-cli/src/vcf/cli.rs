use clap::{Command, arg};

pub const VCF_CMD: &str = "vcf";

pub fn create_vcf_cli() -> Command {
    Command::new(VCF_CMD)
        .about("Convert the mutations of a genome-diff file to VCF records.")
        .arg(
            arg!(--gd <GD>)
                .required(true)
                .help("Path to the genome-diff (.gd) file"),
        )
        .arg(
            arg!(--reference <FASTA>)
                .required(true)
                .help("Path to the reference FASTA (optionally gzip'd)"),
        )
        .arg(
            arg!(--output <VCF>)
                .required(false)
                .help("Also write the records here; a .gz suffix compresses"),
        )
}
