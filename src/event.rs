use std::cmp::Ordering;

use crate::ProcessId;

/// One message transfer between two processes.
///
/// `time` is the sender's clock right after the send step.
/// Observers see it overwritten with the receiver's clock after merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub from: ProcessId,
    pub to: ProcessId,
    pub message: String,
    pub time: u64,
}

impl Event {
    /// Clock condition in contrapositive form.
    ///
    /// `false` means `self` can not happen-before `other`.
    /// `true` only means it is possible: equal clocks order nothing,
    /// and smaller clocks do not imply a causal chain.
    pub fn may_happen_before(&self, other: &Event) -> bool {
        self.time < other.time
    }

    /// Lamport's total order: by time, then by sender name.
    /// Ties between independent events are broken arbitrarily.
    pub fn total_cmp(&self, other: &Event) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.from.cmp(&other.from))
    }
}
