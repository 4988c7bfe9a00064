use std::sync::Arc;

use futures::{
    channel::mpsc,
    lock::Mutex,
    stream::{BoxStream, Fuse},
    SinkExt, StreamExt,
};

use crate::{
    config::MailboxCapacity,
    error::{Error, Result},
    event::Event,
    process::ProcessId,
};

/// Capability to enqueue into a process mailbox.
///
/// The bounded sender is shared by all handles: every `mpsc::Sender`
/// clone owns an extra slot, so cloning per send would bypass the bound.
#[derive(Clone)]
pub(crate) enum MailboxSender {
    Bounded(Arc<Mutex<mpsc::Sender<Event>>>),
    Unbounded(mpsc::UnboundedSender<Event>),
}

/// Reading end, owned by the receive loop only.
pub(crate) type Mailbox = Fuse<BoxStream<'static, Event>>;

pub(crate) fn channel(capacity: MailboxCapacity) -> (MailboxSender, Mailbox) {
    let (sender, mailbox) = match capacity {
        MailboxCapacity::Bounded(buffer) => {
            let (tx, rx) = mpsc::channel(buffer);
            (MailboxSender::Bounded(Arc::new(Mutex::new(tx))), rx.boxed())
        }
        MailboxCapacity::Unbounded => {
            let (tx, rx) = mpsc::unbounded();
            (MailboxSender::Unbounded(tx), rx.boxed())
        }
    };
    (sender, mailbox.fuse())
}

impl MailboxSender {
    /// Waits for a free slot if the mailbox is bounded and full.
    pub(crate) async fn deliver(&self, owner: &ProcessId, event: Event) -> Result<()> {
        match self {
            MailboxSender::Bounded(tx) => {
                let mut tx = tx.lock().await;
                tx.send(event)
                    .await
                    .map_err(|_| Error::MailboxClosed(owner.clone()))
            }
            MailboxSender::Unbounded(tx) => tx
                .unbounded_send(event)
                .map_err(|_| Error::MailboxClosed(owner.clone())),
        }
    }

    /// Never waits; a full mailbox rejects the event.
    /// A bounded mailbox with another sender parked on it counts as full.
    pub(crate) fn try_deliver(&self, owner: &ProcessId, event: Event) -> Result<()> {
        let result = match self {
            MailboxSender::Bounded(tx) => match tx.try_lock() {
                Some(mut tx) => tx.try_send(event).map_err(|e| e.is_full()),
                None => Err(true),
            },
            MailboxSender::Unbounded(tx) => tx.unbounded_send(event).map_err(|e| e.is_full()),
        };
        match result {
            Ok(()) => Ok(()),
            Err(true) => Err(Error::MailboxFull(owner.clone())),
            Err(false) => Err(Error::MailboxClosed(owner.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, StreamExt};

    use super::channel;
    use crate::{config::MailboxCapacity, error::Error, event::Event, process::ProcessId};

    fn event(time: u64) -> Event {
        Event {
            from: "a".into(),
            to: "b".into(),
            message: format!("msg {time}"),
            time,
        }
    }

    #[test]
    fn fifo() {
        let owner = ProcessId::from("b");
        let (tx, mut rx) = channel(MailboxCapacity::Unbounded);
        block_on(async {
            for time in 1..=5 {
                tx.deliver(&owner, event(time)).await.unwrap();
            }
            for time in 1..=5 {
                assert_eq!(rx.next().await.unwrap().time, time);
            }
        });
    }

    #[test]
    fn bounded_rejects_when_full() {
        let owner = ProcessId::from("b");
        // zero buffer still leaves the sender's own slot
        let (tx, _rx) = channel(MailboxCapacity::Bounded(0));
        tx.try_deliver(&owner, event(1)).unwrap();
        let err = tx.try_deliver(&owner, event(2)).unwrap_err();
        assert!(matches!(err, Error::MailboxFull(ref id) if *id == owner));
    }

    #[test]
    fn closed_after_reader_dropped() {
        let owner = ProcessId::from("b");
        let (tx, rx) = channel(MailboxCapacity::Bounded(4));
        drop(rx);
        let err = block_on(tx.deliver(&owner, event(1))).unwrap_err();
        assert!(matches!(err, Error::MailboxClosed(_)));
    }
}
