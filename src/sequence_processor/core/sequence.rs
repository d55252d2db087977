/// One FASTA/FASTQ record as handed out by a reader.
///
/// Readers own a single instance and overwrite it for every record, so the
/// buffers are reused across the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub seq: Vec<u8>,
    /// Empty when the source format carries no qualities (FASTA).
    pub qual: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>, qual: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
            qual: qual.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn has_quality(&self) -> bool {
        !self.qual.is_empty()
    }

    pub(crate) fn fill(&mut self, id: &str, seq: &[u8], qual: &[u8]) {
        self.id.clear();
        self.id.push_str(id);
        self.seq.clear();
        self.seq.extend_from_slice(seq);
        self.qual.clear();
        self.qual.extend_from_slice(qual);
    }
}
