//! Convert FASTA/FASTQ records into an unaligned BAM through SAM text.
//!
//! Records are read one at a time, rendered as unmapped SAM lines and
//! streamed to a BAM encoder, so memory use is bounded by the longest record.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod sam;
pub mod sequence_processor;
pub mod sink;
pub mod types;
pub mod utils;

pub use error::{ConvertError, ErrorKind};
pub use pipeline::{convert, convert_into, ConvertOptions};
