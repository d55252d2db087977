//! Destinations for the generated SAM text.
//!
//! A sink is a byte stream plus a finalize step; the SAM emitter does not
//! know whether the bytes go to a child process or a linked encoder.

mod htslib;
mod samtools;

pub use self::htslib::HtslibSink;
pub use self::samtools::SamtoolsSink;

use crate::error::Result;
use crate::pipeline::ConvertOptions;
use crate::types::Backend;
use log::info;
use std::io::Write;

pub trait AlignmentSink: Write {
    /// Flushes outstanding data and waits for the encoder to complete.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Collects SAM text in memory.
impl AlignmentSink for Vec<u8> {
    fn finish(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

pub fn open(options: &ConvertOptions) -> Result<Box<dyn AlignmentSink>> {
    match options.backend {
        Backend::Samtools => {
            info!(
                "Encoding with {} ({} threads) into {}",
                options.samtools,
                options.threads,
                options.output.display()
            );
            let sink = SamtoolsSink::spawn(&options.samtools, options.threads, &options.output)?;
            Ok(Box::new(sink))
        }
        Backend::Htslib => {
            info!(
                "Encoding with htslib ({} threads) into {}",
                options.threads,
                options.output.display()
            );
            Ok(Box::new(HtslibSink::new(&options.output, options.threads)))
        }
    }
}
