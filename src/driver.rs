use rand::Rng;

use crate::{error::Result, process::Process, ProcessId};

/// Outcome of a single driver tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub from: ProcessId,
    pub to: ProcessId,
    /// Send timestamp of the sender.
    pub time: u64,
}

/// Sends a fixed payload between uniformly chosen pairs of processes.
///
/// Sender and receiver are drawn independently, so a tick may be a self-send.
pub struct RandomPairs<R> {
    processes: Vec<Process>,
    message: String,
    rng: R,
}

impl<R: Rng> RandomPairs<R> {
    pub fn new(processes: Vec<Process>, rng: R) -> Self {
        Self {
            processes,
            message: "hi".to_string(),
            rng,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Picks a pair and sends, blocking while the receiver's mailbox is full.
    /// Returns `None` if there are no processes.
    pub fn tick(&mut self) -> Option<Result<Tick>> {
        if self.processes.is_empty() {
            return None;
        }
        let from = &self.processes[self.rng.gen_range(0..self.processes.len())];
        let to = &self.processes[self.rng.gen_range(0..self.processes.len())];
        let result = from
            .send_blocking(to, self.message.as_str())
            .map(|time| Tick {
                from: from.id().clone(),
                to: to.id().clone(),
                time,
            });
        Some(result)
    }
}
