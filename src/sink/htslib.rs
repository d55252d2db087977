use super::AlignmentSink;
use crate::error::{ConvertError, Result};
use rust_htslib::bam::{self, Header, HeaderView, Writer};
use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};

fn to_io_error(e: rust_htslib::errors::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn invalid_header(line: &[u8], reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "invalid SAM header line {:?}: {}",
            String::from_utf8_lossy(line),
            reason
        ),
    )
}

fn is_tag(tag: &[u8]) -> bool {
    tag.len() == 2 && tag[0].is_ascii_alphabetic() && tag[1].is_ascii_alphanumeric()
}

/// Checks the header text before htslib sees it; `sam_hdr_parse` failures
/// are not reported through rust-htslib.
fn validate_header(text: &[u8]) -> io::Result<()> {
    for line in text.split(|&b| b == b'\n').filter(|l| !l.is_empty()) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let mut fields = line.split(|&b| b == b'\t');
        let record_type = fields.next().unwrap_or_default();
        if record_type.len() != 3 || record_type[0] != b'@' || !is_tag(&record_type[1..]) {
            return Err(invalid_header(line, "expected a tab-separated @XY record"));
        }
        if &record_type[1..] == b"CO" {
            continue;
        }

        let mut tags = Vec::new();
        for field in fields {
            if field.len() < 3 || field[2] != b':' || !is_tag(&field[..2]) {
                return Err(invalid_header(line, "expected TAG:VALUE fields"));
            }
            tags.push(&field[..2]);
        }

        let required: &[&[u8]] = match &record_type[1..] {
            b"HD" => &[&b"VN"[..]],
            b"SQ" => &[&b"SN"[..], &b"LN"[..]],
            b"RG" | b"PG" => &[&b"ID"[..]],
            _ => &[],
        };
        if let Some(missing) = required.iter().find(|tag| !tags.contains(*tag)) {
            return Err(invalid_header(
                line,
                &format!("missing {} tag", String::from_utf8_lossy(missing)),
            ));
        }
    }
    Ok(())
}

/// Encodes SAM text to BAM in-process through htslib.
///
/// Leading `@` lines form the header; the BAM file is created when the first
/// alignment line arrives, or on `finish` when there were no alignments.
pub struct HtslibSink {
    output: PathBuf,
    threads: usize,
    header_text: Vec<u8>,
    line: Vec<u8>,
    writer: Option<(Writer, HeaderView)>,
}

impl HtslibSink {
    pub fn new(output: &Path, threads: usize) -> Self {
        Self {
            output: output.to_path_buf(),
            threads,
            header_text: Vec::new(),
            line: Vec::new(),
            writer: None,
        }
    }

    fn open_writer(&mut self) -> io::Result<()> {
        if self.writer.is_some() {
            return Ok(());
        }

        validate_header(&self.header_text)?;
        let view = if self.header_text.is_empty() {
            HeaderView::from_header(&Header::new())
        } else {
            HeaderView::from_bytes(&self.header_text)
        };
        let header = Header::from_template(&view);
        let mut writer =
            Writer::from_path(&self.output, &header, bam::Format::Bam).map_err(to_io_error)?;
        writer.set_threads(self.threads).map_err(to_io_error)?;

        self.writer = Some((writer, view));
        Ok(())
    }

    fn consume_line(&mut self) -> io::Result<()> {
        let mut line = mem::take(&mut self.line);

        if self.writer.is_none() && line.first() == Some(&b'@') {
            self.header_text.extend_from_slice(&line);
            self.header_text.push(b'\n');
        } else if !line.is_empty() {
            self.open_writer()?;
            if let Some((writer, view)) = self.writer.as_mut() {
                let record = bam::Record::from_sam(view, &line).map_err(to_io_error)?;
                writer.write(&record).map_err(to_io_error)?;
            }
        }

        line.clear();
        self.line = line;
        Ok(())
    }
}

impl Write for HtslibSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while let Some(end) = rest.iter().position(|&b| b == b'\n') {
            self.line.extend_from_slice(&rest[..end]);
            self.consume_line()?;
            rest = &rest[end + 1..];
        }
        self.line.extend_from_slice(rest);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AlignmentSink for HtslibSink {
    fn finish(mut self: Box<Self>) -> Result<()> {
        if !self.line.is_empty() {
            self.consume_line().map_err(ConvertError::SinkWrite)?;
        }
        self.open_writer().map_err(ConvertError::SinkWrite)?;
        // Dropping the writer closes the BGZF stream.
        self.writer.take();
        Ok(())
    }
}
