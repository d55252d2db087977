//! The streaming FASTA/FASTQ to BAM conversion.
//!
//! Order of operations: validate options, check the encoder, open the input,
//! open the header override, start the sink, write the header, stream the
//! records, finalize the sink. Any failure stops the run; resources already
//! acquired are released as they go out of scope.

use crate::error::{ConvertError, Result};
use crate::sam::{IdentifierPolicy, NameTransform, SamEmitter, SamHeader};
use crate::sequence_processor::{FastxReader, ProcessingStats, SequenceReader};
use crate::sink;
use crate::types::Backend;
use crate::utils::external_tools::check_samtools;
use indicatif::ProgressBar;
use log::info;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Passed through to the encoder.
    pub threads: usize,
    pub identifiers: IdentifierPolicy,
    pub header: Option<PathBuf>,
    pub backend: Backend,
    pub samtools: String,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            threads: 1,
            identifiers: IdentifierPolicy::default(),
            header: None,
            backend: Backend::default(),
            samtools: "samtools".to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads < 1 {
            return Err(ConvertError::Config(format!(
                "invalid thread count: {}",
                self.threads
            )));
        }
        Ok(())
    }
}

/// Converts `options.input` into a BAM file at `options.output`.
pub fn convert(options: &ConvertOptions, progress: &ProgressBar) -> Result<ProcessingStats> {
    options.validate()?;

    if options.backend == Backend::Samtools {
        check_samtools(&options.samtools)?;
    }

    let mut reader = FastxReader::new(&options.input)?;
    info!(
        "Reading {} ({}, compression: {:?})",
        options.input.display(),
        reader
            .format()
            .map_or_else(|| "empty".to_string(), |f| f.to_string()),
        reader.compression()
    );

    let header = SamHeader::load(options.header.as_deref())?;
    info!("Using SAM header: {}", header.describe());

    let sink = sink::open(options)?;
    let (stats, sink) = convert_into(&mut reader, header, sink, options.identifiers.clone(), progress)?;
    sink.finish()?;

    Ok(stats)
}

/// Streams every record of `reader` as SAM text into `out`, preceded by `header`.
///
/// Returns the sink so the caller can finalize it.
pub fn convert_into<R: SequenceReader, W: Write>(
    reader: &mut R,
    header: SamHeader,
    out: W,
    identifiers: IdentifierPolicy,
    progress: &ProgressBar,
) -> Result<(ProcessingStats, W)> {
    let mut emitter = SamEmitter::new(out, header, NameTransform::new(identifiers))?;
    let stats = reader.read_sequences(&mut emitter, progress)?;
    Ok((stats, emitter.into_inner()))
}
