use super::sequence::SequenceRecord;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub processed: u64,
    pub bases: u64,
    /// Records written with a synthesized quality string.
    pub placeholder_quality: u64,
}

impl ProcessingStats {
    pub fn record(&mut self, record: &SequenceRecord) {
        self.processed += 1;
        self.bases += record.len() as u64;
        if !record.has_quality() {
            self.placeholder_quality += 1;
        }
    }
}
