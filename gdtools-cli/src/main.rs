mod vcf {
    pub mod cli;
    pub mod handlers;
}
mod export {
    pub mod cli;
    pub mod handlers;
}
mod isolate {
    pub mod cli;
    pub mod handlers;
}
mod assembly {
    pub mod cli;
    pub mod handlers;
}
mod fastq {
    pub mod cli;
    pub mod handlers;
}

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "gdtools";
    pub const BIN_NAME: &str = "gdtools";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Tools for breseq genome-diff files and the sequencing data around them.")
        .subcommand_required(true)
        .subcommand(vcf::cli::create_vcf_cli())
        .subcommand(export::cli::create_export_cli())
        .subcommand(isolate::cli::create_isolate_cli())
        .subcommand(isolate::cli::create_isolate_set_cli())
        .subcommand(assembly::cli::create_assembly_cli())
        .subcommand(assembly::cli::create_relabel_cli())
        .subcommand(fastq::cli::create_concat_fastq_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // GENOME DIFF
        //
        Some((vcf::cli::VCF_CMD, matches)) => {
            vcf::handlers::run_vcf(matches)?;
        }
        Some((export::cli::EXPORT_CMD, matches)) => {
            export::handlers::run_export(matches)?;
        }

        //
        // BRESEQ OUTPUT FOLDERS
        //
        Some((isolate::cli::ISOLATE_CMD, matches)) => {
            isolate::handlers::run_isolate(matches)?;
        }
        Some((isolate::cli::ISOLATE_SET_CMD, matches)) => {
            isolate::handlers::run_isolate_set(matches)?;
        }

        //
        // NCBI ASSEMBLIES
        //
        Some((assembly::cli::ASSEMBLY_CMD, matches)) => {
            assembly::handlers::run_assembly(matches)?;
        }
        Some((assembly::cli::RELABEL_CMD, matches)) => {
            assembly::handlers::run_relabel(matches)?;
        }

        //
        // FASTQ
        //
        Some((fastq::cli::CONCAT_FASTQ_CMD, matches)) => {
            fastq::handlers::run_concat_fastq(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
