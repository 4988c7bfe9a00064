use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use futures::{
    channel::{mpsc, oneshot},
    executor::block_on,
    StreamExt,
};
use tracing::{debug, info, trace, warn};

use crate::{
    clock::LamportClock,
    config::SelfSendPolicy,
    error::Result,
    event::Event,
    mailbox::{Mailbox, MailboxSender},
};

/// Immutable process name, used for display and equality only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(Arc<str>);

impl ProcessId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessId {
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

impl From<String> for ProcessId {
    fn from(name: String) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State shared between the handles of a process and its receive loop.
struct Shared {
    id: ProcessId,
    clock: LamportClock,
    /// Receivers of post-merge events.
    observers: Mutex<Vec<mpsc::UnboundedSender<Event>>>,
}

impl Shared {
    fn publish(&self, event: &Event) {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        observers.retain(|observer| observer.unbounded_send(event.clone()).is_ok());
    }
}

/// Handle to a running process.
///
/// Cheap to clone and usable from any thread. The receive loop
/// is started by [`crate::System::add_process`] and lives as long
/// as the owning system.
#[derive(Clone)]
pub struct Process {
    shared: Arc<Shared>,
    mailbox: MailboxSender,
    self_send: SelfSendPolicy,
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("id", &self.shared.id)
            .field("time", &self.shared.clock.time())
            .finish()
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.shared.id, f)
    }
}

impl Process {
    pub(crate) fn new(id: ProcessId, mailbox: MailboxSender, self_send: SelfSendPolicy) -> Self {
        let shared = Arc::new(Shared {
            id,
            clock: LamportClock::new(),
            observers: Mutex::new(Vec::new()),
        });
        Self {
            shared,
            mailbox,
            self_send,
        }
    }

    pub fn id(&self) -> &ProcessId {
        &self.shared.id
    }

    /// Current logical time.
    pub fn time(&self) -> u64 {
        self.shared.clock.time()
    }

    /// Local event. Returns the new logical time.
    pub fn step(&self) -> u64 {
        self.shared.clock.step()
    }

    /// Stream of events received by this process, stamped with the
    /// receiver's clock after merge. Only events received after the
    /// call are observed.
    pub fn observe(&self) -> mpsc::UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded();
        self.shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Steps the clock and stamps a new event addressed to `to`.
    /// `None` means the event must not be enqueued.
    fn prepare(&self, to: &Process, message: String) -> (u64, Option<Event>) {
        let time = self.step();
        if self.shared.id == to.shared.id && self.self_send == SelfSendPolicy::Skip {
            debug!(time, process = %self.shared.id, payload = %message, "internal event");
            return (time, None);
        }
        debug!(time, from = %self.shared.id, to = %to.shared.id, payload = %message, "send");
        let event = Event {
            from: self.shared.id.clone(),
            to: to.shared.id.clone(),
            message,
            time,
        };
        (time, Some(event))
    }

    /// Sends `message` to `to` and returns the send timestamp.
    ///
    /// The clock is stepped before delivery and stays stepped
    /// if delivery fails. Waits while a bounded mailbox is full.
    pub async fn send(&self, to: &Process, message: impl Into<String>) -> Result<u64> {
        let (time, event) = self.prepare(to, message.into());
        if let Some(event) = event {
            to.mailbox
                .deliver(&to.shared.id, event)
                .await
                .inspect_err(|err| warn!(time, from = %self.shared.id, %err, "delivery failed"))?;
        }
        Ok(time)
    }

    /// Like [`Process::send`], but never waits: a full mailbox drops
    /// the event and reports [`crate::Error::MailboxFull`].
    pub fn try_send(&self, to: &Process, message: impl Into<String>) -> Result<u64> {
        let (time, event) = self.prepare(to, message.into());
        if let Some(event) = event {
            to.mailbox
                .try_deliver(&to.shared.id, event)
                .inspect_err(|err| warn!(time, from = %self.shared.id, %err, "delivery failed"))?;
        }
        Ok(time)
    }

    /// Blocks the current thread until [`Process::send`] completes.
    /// Must not be called from inside an executor task.
    pub fn send_blocking(&self, to: &Process, message: impl Into<String>) -> Result<u64> {
        block_on(self.send(to, message))
    }

    /// Receive loop: runs until the mailbox closes or `shutdown` fires.
    pub(crate) fn receive_loop(
        &self,
        mailbox: Mailbox,
        shutdown: oneshot::Receiver<()>,
    ) -> impl std::future::Future<Output = ()> + Send + 'static {
        let shared = self.shared.clone();
        receive(shared, mailbox, shutdown)
    }
}

async fn receive(shared: Arc<Shared>, mut mailbox: Mailbox, mut shutdown: oneshot::Receiver<()>) {
    trace!(process = %shared.id, "receive loop started");
    loop {
        futures::select! {
            event = mailbox.next() => {
                let Some(mut event) = event else {
                    break;
                };
                event.time = shared.clock.merge(event.time);
                info!(
                    time = event.time,
                    from = %event.from,
                    to = %event.to,
                    payload = %event.message,
                    "{}: {} => {}: {}",
                    event.time,
                    event.from,
                    event.to,
                    event.message,
                );
                shared.publish(&event);
            }
            _ = shutdown => break,
        }
    }
    trace!(process = %shared.id, "receive loop stopped");
}
