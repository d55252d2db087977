use super::input::{InputState, RecordInput};
use crate::error::{ConvertError, Result};
use crate::sequence_processor::core::{SequenceReader, SequenceRecord};
use bio::io::fasta::{self, FastaRead};
use bio::io::fastq::{self, FastqRead};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

const READ_BUFFER_CAPACITY: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastxFormat {
    Fasta,
    Fastq,
}

impl fmt::Display for FastxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastxFormat::Fasta => write!(f, "FASTA"),
            FastxFormat::Fastq => write!(f, "FASTQ"),
        }
    }
}

enum Parser {
    Fasta(fasta::Reader<RecordInput>),
    Fastq(fastq::Reader<RecordInput>),
}

/// Streams FASTA or FASTQ records from a plain or compressed source.
///
/// The format is chosen from the first non-blank byte of the decompressed
/// stream. Blank lines between FASTQ records are ignored. A record without a
/// name is a decode error, never the end of the stream. The underlying handle
/// is released as soon as the stream is exhausted.
pub struct FastxReader {
    path: PathBuf,
    parser: Option<Parser>,
    input_state: Rc<InputState>,
    format: Option<FastxFormat>,
    compression: niffler::Format,
    record: SequenceRecord,
    fasta_record: fasta::Record,
    fastq_record: fastq::Record,
    records_read: u64,
}

impl FastxReader {
    pub fn new(path: &Path) -> Result<Self> {
        let open_error = |source: io::Error| ConvertError::InputOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        let (inner_reader, compression) = match niffler::get_reader(Box::new(file)) {
            Ok(pair) => pair,
            // Too short to carry a compression magic number, read it as-is.
            Err(niffler::Error::FileTooShort) => {
                let file = File::open(path).map_err(open_error)?;
                (Box::new(file) as Box<dyn Read>, niffler::Format::No)
            }
            Err(niffler::Error::IOError(e)) => return Err(open_error(e)),
            Err(e) => return Err(open_error(io::Error::new(io::ErrorKind::Other, e.to_string()))),
        };

        Self::from_boxed(path.to_path_buf(), inner_reader, compression)
    }

    /// Reads records from an already decompressed source; `source` only labels errors.
    pub fn from_reader<R: Read + 'static>(reader: R, source: impl Into<PathBuf>) -> Result<Self> {
        Self::from_boxed(source.into(), Box::new(reader), niffler::Format::No)
    }

    fn from_boxed(
        path: PathBuf,
        inner_reader: Box<dyn Read>,
        compression: niffler::Format,
    ) -> Result<Self> {
        let mut input = RecordInput::new(BufReader::with_capacity(READ_BUFFER_CAPACITY, inner_reader));
        let input_state = input.state();
        input_state.skip_blank_lines();

        // A corrupt compressed stream fails here, before anything is emitted.
        let leading = match input.fill_buf() {
            Ok(buf) => buf.first().copied(),
            Err(source) => return Err(ConvertError::InputOpen { path, source }),
        };

        let (parser, format) = match leading {
            None => (None, None),
            Some(b'>') => (
                Some(Parser::Fasta(fasta::Reader::from_bufread(input))),
                Some(FastxFormat::Fasta),
            ),
            Some(b'@') => (
                Some(Parser::Fastq(fastq::Reader::from_bufread(input))),
                Some(FastxFormat::Fastq),
            ),
            Some(other) => {
                return Err(ConvertError::Decode {
                    path,
                    record: 1,
                    message: format!(
                        "expected '>' or '@' at start of input, found {:?}",
                        other as char
                    ),
                })
            }
        };

        debug!(
            "Opened {} (format: {}, compression: {:?})",
            path.display(),
            format.map_or_else(|| "empty".to_string(), |f| f.to_string()),
            compression
        );

        Ok(Self {
            path,
            parser,
            input_state,
            format,
            compression,
            record: SequenceRecord::default(),
            fasta_record: fasta::Record::new(),
            fastq_record: fastq::Record::new(),
            records_read: 0,
        })
    }

    /// `None` for an empty input.
    pub fn format(&self) -> Option<FastxFormat> {
        self.format
    }

    pub fn compression(&self) -> niffler::Format {
        self.compression
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Drops the underlying stream; later calls to `next_record` yield `None`.
    pub fn close(&mut self) {
        self.parser = None;
    }
}

fn decode_error(path: &Path, record: u64, message: impl Into<String>) -> ConvertError {
    ConvertError::Decode {
        path: path.to_path_buf(),
        record,
        message: message.into(),
    }
}

impl SequenceReader for FastxReader {
    fn next_record(&mut self) -> Result<Option<&SequenceRecord>> {
        let ordinal = self.records_read + 1;
        let found = match self.parser.as_mut() {
            None => false,
            Some(Parser::Fasta(reader)) => {
                // The FASTA parser reads one line ahead, so the stream is
                // already drained before the call that reports its end.
                let drained = self.input_state.at_eof();
                reader
                    .read(&mut self.fasta_record)
                    .map_err(|e| decode_error(&self.path, ordinal, e.to_string()))?;
                if self.fasta_record.is_empty() && drained {
                    false
                } else {
                    if self.fasta_record.id().is_empty() {
                        return Err(decode_error(&self.path, ordinal, "record has no name"));
                    }
                    self.record
                        .fill(self.fasta_record.id(), self.fasta_record.seq(), &[]);
                    true
                }
            }
            Some(Parser::Fastq(reader)) => {
                self.input_state.skip_blank_lines();
                reader
                    .read(&mut self.fastq_record)
                    .map_err(|e| decode_error(&self.path, ordinal, e.to_string()))?;
                if self.fastq_record.is_empty() && self.input_state.at_eof() {
                    false
                } else {
                    if self.fastq_record.id().is_empty() {
                        return Err(decode_error(&self.path, ordinal, "record has no name"));
                    }
                    let (seq, qual) = (self.fastq_record.seq(), self.fastq_record.qual());
                    if seq.len() != qual.len() {
                        return Err(decode_error(
                            &self.path,
                            ordinal,
                            format!(
                                "quality length {} does not match sequence length {}",
                                qual.len(),
                                seq.len()
                            ),
                        ));
                    }
                    self.record.fill(self.fastq_record.id(), seq, qual);
                    true
                }
            }
        };

        if !found {
            self.close();
            return Ok(None);
        }

        self.records_read = ordinal;
        Ok(Some(&self.record))
    }
}
