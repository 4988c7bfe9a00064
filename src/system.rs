use std::collections::HashMap;

use futures::{
    channel::oneshot,
    executor::{block_on, ThreadPool},
    future::{join_all, RemoteHandle},
    task::SpawnExt,
};
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
    mailbox,
    process::{Process, ProcessId},
};

/// Receive loop of a registered process, as seen by the system.
struct Running {
    shutdown: oneshot::Sender<()>,
    /// Dropping the handle cancels the loop.
    done: RemoteHandle<()>,
}

/// Owns the executor running receive loops and the set of
/// processes known by name.
///
/// Dropping the system cancels every receive loop; [`System::shutdown`]
/// stops them gracefully instead.
pub struct System {
    config: Config,
    pool: ThreadPool,
    proc: HashMap<ProcessId, Process>,
    running: Vec<Running>,
}

impl System {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = ThreadPool::builder();
        builder.name_prefix("lamport-");
        if let Some(size) = config.pool_size {
            builder.pool_size(size);
        }
        let pool = builder.create()?;
        Ok(Self {
            config,
            pool,
            proc: HashMap::new(),
            running: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates a process with clock 0 and an empty mailbox,
    /// and starts its receive loop.
    pub fn add_process(&mut self, name: impl Into<ProcessId>) -> Result<Process> {
        let id = name.into();
        if self.proc.contains_key(&id) {
            return Err(Error::DuplicateProcess(id));
        }

        let (sender, mailbox) = mailbox::channel(self.config.mailbox);
        let process = Process::new(id.clone(), sender, self.config.self_send);

        let (shutdown, shutdown_rx) = oneshot::channel();
        let done = self
            .pool
            .spawn_with_handle(process.receive_loop(mailbox, shutdown_rx))
            .map_err(|err| Error::Executor(std::io::Error::other(err)))?;
        self.running.push(Running { shutdown, done });

        debug!(process = %id, "process added");
        self.proc.insert(id, process.clone());
        Ok(process)
    }

    pub fn process(&self, name: &str) -> Option<Process> {
        self.proc.get(&ProcessId::from(name)).cloned()
    }

    /// Registered processes, sorted by name.
    pub fn processes(&self) -> Vec<Process> {
        let mut all: Vec<_> = self.proc.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }

    /// Sends between processes addressed by name.
    ///
    /// An unknown recipient is reported after the sender's clock
    /// has been stepped, the same as any other failed delivery.
    pub async fn send(&self, from: &str, to: &str, message: impl Into<String>) -> Result<u64> {
        let sender = self
            .process(from)
            .ok_or_else(|| Error::UnknownSender(from.into()))?;
        match self.process(to) {
            Some(receiver) => sender.send(&receiver, message).await,
            None => {
                let time = sender.step();
                debug!(time, from, to, "unknown recipient");
                Err(Error::UnknownRecipient(to.into()))
            }
        }
    }

    /// Signals every receive loop to stop and waits until all have exited.
    /// Events still queued in mailboxes are discarded.
    pub fn shutdown(mut self) {
        let running = std::mem::take(&mut self.running);
        let mut done = Vec::with_capacity(running.len());
        for Running { shutdown, done: handle } in running {
            // the loop may already be gone
            let _ = shutdown.send(());
            done.push(handle);
        }
        block_on(join_all(done));
        debug!(processes = self.proc.len(), "system shut down");
    }
}
