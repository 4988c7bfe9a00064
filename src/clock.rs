use std::sync::atomic::{AtomicU64, Ordering};

/// Scalar logical clock of a single process.
///
/// Both the sending path and the receive loop advance the same clock,
/// so every update is a single atomic operation.
#[derive(Debug, Default)]
pub struct LamportClock {
    time: AtomicU64,
}

impl LamportClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(time: u64) -> Self {
        Self {
            time: AtomicU64::new(time),
        }
    }

    pub fn time(&self) -> u64 {
        self.time.load(Ordering::SeqCst)
    }

    /// Local event: advances the clock by exactly one
    /// and returns the new value. Saturates at `u64::MAX`.
    pub fn step(&self) -> u64 {
        self.update(|time| time.saturating_add(1))
    }

    /// Receive event: `time = max(time, received) + 1`.
    /// Returns the new value. Saturates at `u64::MAX`.
    pub fn merge(&self, received: u64) -> u64 {
        self.update(|time| time.max(received).saturating_add(1))
    }

    /// Applies a non-decreasing `next` atomically; returns the stored value.
    fn update(&self, next: impl Fn(u64) -> u64) -> u64 {
        match self
            .time
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |time| Some(next(time)))
        {
            Ok(previous) | Err(previous) => next(previous),
        }
    }
}
