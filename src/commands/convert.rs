use crate::cli::Args;
use crate::config::Config;
use crate::pipeline::{self, ConvertOptions};
use crate::sam::IdentifierPolicy;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::info;

/// Command-line flags win over the config file.
pub fn resolve_options(args: Args, config: Config) -> ConvertOptions {
    ConvertOptions {
        input: args.input,
        output: args.output,
        threads: args.threads.map_or(config.threads, |t| t as usize),
        identifiers: IdentifierPolicy {
            rename: args.rename,
            prefix: args.prefix,
            suffix: args.suffix,
        },
        header: args.header,
        backend: args.backend.unwrap_or(config.backend),
        samtools: args.samtools.unwrap_or(config.samtools),
    }
}

pub fn run(args: Args) -> Result<()> {
    let quiet = args.quiet;
    let options = resolve_options(args, Config::load());

    let progress = ProgressBarBuilder::new("Converting records")
        .with_template("{spinner:.green} [{elapsed_precise}] {msg}: {pos} ({per_sec})")
        .hidden(quiet)
        .with_tick()
        .build()?;

    let stats = pipeline::convert(&options, &progress).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            options.input.display(),
            options.output.display()
        )
    })?;

    progress.finish_with_message("Conversion complete");
    info!(
        "Wrote {} records ({} bases, {} with placeholder qualities) to {}",
        stats.processed,
        stats.bases,
        stats.placeholder_quality,
        options.output.display()
    );

    Ok(())
}
