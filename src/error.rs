use crate::ProcessId;

/// Errors surfaced by [`crate::System`] and [`crate::Process`].
///
/// None of them undo the sender's clock step.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown recipient: {0}")]
    UnknownRecipient(ProcessId),
    #[error("unknown sender: {0}")]
    UnknownSender(ProcessId),
    #[error("process {0} is already registered")]
    DuplicateProcess(ProcessId),
    #[error("mailbox of {0} is closed")]
    MailboxClosed(ProcessId),
    #[error("mailbox of {0} is full")]
    MailboxFull(ProcessId),
    #[error("failed to start executor: {0}")]
    Executor(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
