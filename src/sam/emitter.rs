use super::header::SamHeader;
use super::identifier::NameTransform;
use crate::error::{ConvertError, Result};
use crate::sequence_processor::{SequenceProcessor, SequenceRecord};
use lazy_static::lazy_static;
use std::io::{self, Write};

/// Phred+33 '@' is quality 31.
pub const PLACEHOLDER_QUALITY_CHAR: u8 = b'@';
const PLACEHOLDER_QUALITY_LEN: usize = 16 * 1024;

lazy_static! {
    static ref PLACEHOLDER_QUALITY: Vec<u8> = vec![PLACEHOLDER_QUALITY_CHAR; PLACEHOLDER_QUALITY_LEN];
}

/// Constant fields 2-8 of an unmapped alignment: FLAG, RNAME, POS, MAPQ, CIGAR, RNEXT, PNEXT.
const UNMAPPED_FIELDS: &[u8] = b"\t4\t*\t0\t255\t*\t*\t0\t";

/// Writes `len` placeholder quality characters, in buffer-sized chunks.
pub fn write_placeholder_quality<W: Write + ?Sized>(out: &mut W, len: usize) -> io::Result<()> {
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(PLACEHOLDER_QUALITY.len());
        out.write_all(&PLACEHOLDER_QUALITY[..chunk])?;
        remaining -= chunk;
    }
    Ok(())
}

/// Writes one newline-terminated, unmapped SAM line for `record` under `qname`.
pub fn write_sam_record<W: Write + ?Sized>(
    out: &mut W,
    qname: &str,
    record: &SequenceRecord,
) -> io::Result<()> {
    out.write_all(qname.as_bytes())?;
    out.write_all(UNMAPPED_FIELDS)?;
    write!(out, "{}", record.len())?;
    out.write_all(b"\t")?;
    out.write_all(&record.seq)?;
    out.write_all(b"\t")?;
    if record.has_quality() {
        out.write_all(&record.qual)?;
    } else {
        write_placeholder_quality(out, record.len())?;
    }
    out.write_all(b"\n")
}

/// Renders records as unaligned SAM text into a sink.
///
/// The header is written on construction, so it is always the first and
/// only header block in the output.
pub struct SamEmitter<W: Write> {
    out: W,
    names: NameTransform,
}

impl<W: Write> SamEmitter<W> {
    pub fn new(mut out: W, header: SamHeader, names: NameTransform) -> Result<Self> {
        header.write_to(&mut out)?;
        Ok(Self { out, names })
    }

    pub fn emit(&mut self, record: &SequenceRecord) -> Result<()> {
        let qname = self.names.name_for(record);
        write_sam_record(&mut self.out, &qname, record).map_err(ConvertError::SinkWrite)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SequenceProcessor for SamEmitter<W> {
    fn process_sequence(&mut self, sequence: &SequenceRecord) -> Result<()> {
        self.emit(sequence)
    }

    fn finalize(&mut self) -> Result<()> {
        self.out.flush().map_err(ConvertError::SinkWrite)
    }
}
