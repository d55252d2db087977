pub(crate) mod processor;
pub(crate) mod sequence;
pub(crate) mod stats;
mod reader;

pub use processor::SequenceProcessor;
pub use reader::SequenceReader;
pub use sequence::SequenceRecord;
pub use stats::ProcessingStats;
