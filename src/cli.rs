use crate::types::Backend;
use clap::Parser;
use std::path::PathBuf;

/// Convert FASTA/FASTQ (optionally compressed) to an unaligned BAM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to input FASTA or FASTQ file (can be gzipped)
    pub input: PathBuf,

    /// Path to output BAM file
    pub output: PathBuf,

    /// Number of encoder threads [default: 1, or the config file value]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Rename query names to sequential integers (1, 2, ...)
    #[arg(long)]
    pub rename: bool,

    /// Add a prefix to all query names
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Add a suffix to all query names
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Plain-text SAM header to use instead of the default
    #[arg(long)]
    pub header: Option<PathBuf>,

    /// BAM encoder [default: samtools, or the config file value]
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// samtools executable to run
    #[arg(long)]
    pub samtools: Option<String>,

    /// Do not show a progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}
