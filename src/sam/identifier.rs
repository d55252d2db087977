use crate::sequence_processor::SequenceRecord;

/// How query names are derived from input records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierPolicy {
    pub rename: bool,
    pub prefix: String,
    pub suffix: String,
}

/// Applies an [`IdentifierPolicy`] to a stream of records.
///
/// With renaming enabled every call consumes the next 1-based ordinal, so the
/// transform must see each record exactly once and in input order.
#[derive(Debug, Clone)]
pub struct NameTransform {
    policy: IdentifierPolicy,
    counter: u64,
}

impl NameTransform {
    pub fn new(policy: IdentifierPolicy) -> Self {
        Self { policy, counter: 0 }
    }

    pub fn name_for(&mut self, record: &SequenceRecord) -> String {
        if self.policy.rename {
            self.counter += 1;
            format!("{}{}{}", self.policy.prefix, self.counter, self.policy.suffix)
        } else {
            format!("{}{}{}", self.policy.prefix, record.id, self.policy.suffix)
        }
    }
}
