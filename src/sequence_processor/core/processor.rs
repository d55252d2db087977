use super::sequence::SequenceRecord;
use crate::error::Result;

pub trait SequenceProcessor {
    fn process_sequence(&mut self, sequence: &SequenceRecord) -> Result<()>;
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
