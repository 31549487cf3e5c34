use clap::{Arg, Command, arg};

pub const CONCAT_FASTQ_CMD: &str = "concat-fastq";

pub fn create_concat_fastq_cli() -> Command {
    Command::new(CONCAT_FASTQ_CMD)
        .about("Combine demultiplexed FASTQ files per sample and read, following a run's sample sheet.")
        .arg(
            arg!(--sheet <SHEET>)
                .required(true)
                .help("A SampleSheet.csv, or a folder of run folders that each hold one"),
        )
        .arg(
            arg!(--dmux <DIR>)
                .required(true)
                .help("Demultiplexing folder (<run>/<project>/<sample>/*.fastq.gz)"),
        )
        .arg(
            arg!(--output <DIR>)
                .required(false)
                .help("Output folder (default: ~/concatenated_fastq_files)"),
        )
        .arg(
            Arg::new("runs")
                .long("runs")
                .num_args(1..)
                .help("Only process run folders whose name starts with one of these"),
        )
}
