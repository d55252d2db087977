use fastx2bam::sam::{IdentifierPolicy, SamHeader, DEFAULT_HEADER, PLACEHOLDER_QUALITY_CHAR};
use fastx2bam::sequence_processor::{FastxFormat, FastxReader};
use fastx2bam::{convert, convert_into, ConvertOptions, ErrorKind};
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn write_gzip_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

/// Runs the conversion into memory and returns the SAM text.
fn convert_to_sam(path: &Path, header: SamHeader, identifiers: IdentifierPolicy) -> String {
    let mut reader = FastxReader::new(path).unwrap();
    let (stats, out) = convert_into(
        &mut reader,
        header,
        Vec::new(),
        identifiers,
        &ProgressBar::hidden(),
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let data_lines = text.lines().filter(|l| !l.starts_with('@')).count();
    assert_eq!(stats.processed as usize, data_lines);
    text
}

fn body(sam: &str) -> Vec<&str> {
    sam.split_inclusive('\n')
        .filter(|l| !l.starts_with('@'))
        .collect()
}

#[test]
fn fasta_default_policy() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "reads.fa", ">r1\nACGT\n>r2\nTTTT\n");

    let sam = convert_to_sam(&input, SamHeader::Default, IdentifierPolicy::default());

    let expected_header: String = DEFAULT_HEADER.concat();
    assert!(sam.starts_with(&expected_header));
    assert_eq!(
        body(&sam),
        vec![
            "r1\t4\t*\t0\t255\t*\t*\t0\t4\tACGT\t@@@@\n",
            "r2\t4\t*\t0\t255\t*\t*\t0\t4\tTTTT\t@@@@\n",
        ]
    );
}

#[test]
fn fasta_renamed_with_prefix_and_suffix() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "reads.fa", ">r1\nACGT\n>r2\nTTTT\n");

    let sam = convert_to_sam(
        &input,
        SamHeader::Default,
        IdentifierPolicy {
            rename: true,
            prefix: "R".to_string(),
            suffix: "/x".to_string(),
        },
    );

    let qnames: Vec<&str> = body(&sam)
        .iter()
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(qnames, vec!["R1/x", "R2/x"]);
}

#[test]
fn gzipped_fastq_keeps_qualities() {
    let dir = TempDir::new().unwrap();
    let text = "@m1/ccs rq=0.99\nACGTN\n+\nI5#!~\n@m2/ccs\nGG\n+\n??\n@m3/ccs\nT\n+\n+\n";
    let input = write_gzip_input(&dir, "reads.fq.gz", text);

    let reader = FastxReader::new(&input).unwrap();
    assert_eq!(reader.format(), Some(FastxFormat::Fastq));
    assert_eq!(reader.compression(), niffler::Format::Gzip);

    let sam = convert_to_sam(&input, SamHeader::Default, IdentifierPolicy::default());
    let lines = body(&sam);
    assert_eq!(lines.len(), 3);

    for line in &lines {
        assert_eq!(line.trim_end_matches('\n').split('\t').count(), 11);
    }
    assert_eq!(lines[0], "m1/ccs\t4\t*\t0\t255\t*\t*\t0\t5\tACGTN\tI5#!~\n");
    assert!(lines[1].ends_with("\t2\tGG\t??\n"));
    assert!(lines[2].ends_with("\t1\tT\t+\n"));
}

#[test]
fn multiline_and_empty_fasta_records() {
    let dir = TempDir::new().unwrap();
    let input = write_gzip_input(&dir, "contigs.fa.gz", ">c1 desc\nACGT\nAC\n>blank\n>c3\nG\n");

    let sam = convert_to_sam(&input, SamHeader::Default, IdentifierPolicy::default());
    let lines = body(&sam);

    assert_eq!(lines.len(), 3);
    let first: Vec<&str> = lines[0].trim_end_matches('\n').split('\t').collect();
    assert_eq!(first[0], "c1");
    assert_eq!(first[8], "6");
    assert_eq!(first[9], "ACGTAC");
    assert_eq!(first[10].len(), 6);
    assert!(first[10].bytes().all(|b| b == PLACEHOLDER_QUALITY_CHAR));

    assert_eq!(lines[1], "blank\t4\t*\t0\t255\t*\t*\t0\t0\t\t\n");
}

#[test]
fn header_override_replaces_default() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "reads.fa", ">r1\nAC\n");
    let header_text = "@HD\tVN:1.6\tSO:unsorted\n@RG\tID:run7\tSM:sampleA\n";
    let header_path = write_input(&dir, "header.sam", header_text);

    let header = SamHeader::load(Some(&header_path)).unwrap();
    let sam = convert_to_sam(&input, header, IdentifierPolicy::default());

    assert_eq!(sam, format!("{}r1\t4\t*\t0\t255\t*\t*\t0\t2\tAC\t@@\n", header_text));
    assert!(!sam.contains("@PG"));
}

#[test]
fn empty_input_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "empty.fa", "");

    let sam = convert_to_sam(&input, SamHeader::Default, IdentifierPolicy::default());
    assert_eq!(sam, DEFAULT_HEADER.concat());
}

#[test]
fn quality_mismatch_aborts_run() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.fq", "@r1\nACGT\n+\nIII\n");

    let mut reader = FastxReader::new(&input).unwrap();
    let err = convert_into(
        &mut reader,
        SamHeader::Default,
        Vec::new(),
        IdentifierPolicy::default(),
        &ProgressBar::hidden(),
    )
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn missing_encoder_stops_before_reading_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.bam");
    // The input does not exist either; the encoder check must fail first.
    let mut options = ConvertOptions::new(dir.path().join("missing.fa"), &output);
    options.samtools = "fastx2bam-no-such-samtools".to_string();

    let err = convert(&options, &ProgressBar::hidden()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SinkOpen);
    assert!(!output.exists());
}

#[test]
fn missing_input_is_reported_before_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.bam");
    let mut options = ConvertOptions::new(dir.path().join("missing.fa"), &output);
    options.backend = fastx2bam::types::Backend::Htslib;

    let err = convert(&options, &ProgressBar::hidden()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputOpen);
    assert!(!output.exists());
}

#[test]
fn unreadable_header_is_reported_before_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "reads.fa", ">r1\nAC\n");
    let output = dir.path().join("out.bam");
    let mut options = ConvertOptions::new(&input, &output);
    options.backend = fastx2bam::types::Backend::Htslib;
    options.header = Some(dir.path().join("no_header.sam"));

    let err = convert(&options, &ProgressBar::hidden()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HeaderFile);
    assert!(!output.exists());
}

/// Accepts a fixed number of complete lines, then reports a closed pipe.
struct FailAfterLines {
    remaining: usize,
}

impl Write for FailAfterLines {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.remaining == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        }
        let newlines = buf.iter().filter(|&&b| b == b'\n').count();
        self.remaining = self.remaining.saturating_sub(newlines);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_stops_reading_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "reads.fa", ">r1\nA\n>r2\nC\n>r3\nG\n>r4\nT\n>r5\nN\n");
    let mut reader = FastxReader::new(&input).unwrap();

    // Header lines plus the first record.
    let sink = FailAfterLines {
        remaining: DEFAULT_HEADER.len() + 1,
    };
    let err = convert_into(
        &mut reader,
        SamHeader::Default,
        sink,
        IdentifierPolicy::default(),
        &ProgressBar::hidden(),
    )
    .err()
    .unwrap();

    assert_eq!(err.kind(), ErrorKind::SinkWrite);
    assert!(err.is_broken_pipe());
    assert_eq!(reader.records_read(), 2);
}

#[test]
fn nameless_fasta_record_aborts_run() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "reads.fa", ">r1\nAC\n>\n>r3\nGG\n");
    let mut reader = FastxReader::new(&input).unwrap();

    let err = convert_into(
        &mut reader,
        SamHeader::Default,
        Vec::new(),
        IdentifierPolicy::default(),
        &ProgressBar::hidden(),
    )
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(reader.records_read(), 1);
}
