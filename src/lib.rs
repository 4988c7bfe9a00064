mod clock;
mod config;
mod driver;
mod error;
mod event;
mod mailbox;
mod process;
mod system;

pub use clock::LamportClock;
pub use config::{Config, MailboxCapacity, SelfSendPolicy};
pub use driver::{RandomPairs, Tick};
pub use error::{Error, Result};
pub use event::Event;
pub use process::{Process, ProcessId};
pub use system::System;
