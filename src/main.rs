use clap::Parser;
use env_logger::Env;
use fastx2bam::cli::Args;
use fastx2bam::commands;
use fastx2bam::error::ConvertError;
use log::error;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = commands::convert::run(args) {
        let broken_pipe = e
            .downcast_ref::<ConvertError>()
            .map_or(false, ConvertError::is_broken_pipe);
        if broken_pipe {
            error!("{:#} (the BAM encoder stopped reading its input)", e);
        } else {
            error!("{:#}", e);
        }
        std::process::exit(1);
    }
}
