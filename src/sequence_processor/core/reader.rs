use super::processor::SequenceProcessor;
use super::sequence::SequenceRecord;
use super::stats::ProcessingStats;
use crate::error::Result;
use indicatif::ProgressBar;

const PROGRESS_INTERVAL: u64 = 10_000;

pub trait SequenceReader {
    /// Advances to the next record. `Ok(None)` marks the end of the stream;
    /// the stream cannot be restarted.
    fn next_record(&mut self) -> Result<Option<&SequenceRecord>>;

    /// Feeds every remaining record to `processor`, stopping at the first error.
    fn read_sequences<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
        progress: &ProgressBar,
    ) -> Result<ProcessingStats> {
        let mut stats = ProcessingStats::default();

        while let Some(record) = self.next_record()? {
            processor.process_sequence(record)?;
            stats.record(record);

            if stats.processed % PROGRESS_INTERVAL == 0 {
                progress.set_position(stats.processed);
            }
        }

        progress.set_position(stats.processed);
        processor.finalize()?;
        Ok(stats)
    }
}
