pub mod core;
pub mod readers;

// Re-export commonly used items
pub use core::{ProcessingStats, SequenceProcessor, SequenceReader, SequenceRecord};
pub use readers::{FastxFormat, FastxReader};
