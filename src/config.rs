/// Mailbox capacity of every process in a [`crate::System`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxCapacity {
    /// Senders wait while the mailbox holds this many events.
    /// Each sender handle additionally owns one guaranteed slot.
    Bounded(usize),
    /// Senders never wait; the queue grows without limit.
    Unbounded,
}

/// What [`crate::Process::send`] does when sender and receiver are the same process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelfSendPolicy {
    /// Step the clock, enqueue nothing.
    #[default]
    Skip,
    /// Enqueue into the own mailbox; the receive loop merges it later.
    AlwaysEnqueue,
}

/// Configuration of a [`crate::System`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of each process mailbox.
    pub mailbox: MailboxCapacity,
    /// Handling of sends addressed to the sender itself.
    pub self_send: SelfSendPolicy,
    /// Number of executor threads running receive loops.
    /// `None` uses one thread per CPU.
    pub pool_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mailbox: MailboxCapacity::Bounded(16),
            self_send: SelfSendPolicy::Skip,
            pool_size: None,
        }
    }
}

impl Config {
    pub fn with_mailbox(mut self, mailbox: MailboxCapacity) -> Self {
        self.mailbox = mailbox;
        self
    }

    pub fn with_self_send(mut self, self_send: SelfSendPolicy) -> Self {
        self.self_send = self_send;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = Some(pool_size);
        self
    }
}
