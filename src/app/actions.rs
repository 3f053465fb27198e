//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O. It returns
//! a `Vec<Action>` that the [`Runtime`](crate::app::Runtime) executes in
//! order against the worker and the [`Host`](crate::app::Host).

use crate::notify::Millis;
use crate::routing::NavigationCommand;
use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands blocking work (content load, preference write) to the worker.
    /// Its response comes back as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Adds a history entry for `href`.
    PushLocation(String),

    /// Overwrites the current history entry without a new entry.
    ReplaceLocation(String),

    ScrollToTop,

    /// Deliver [`Event::Tick`](crate::app::Event::Tick) at `at` on the host
    /// clock. A later schedule supersedes an earlier one.
    ScheduleTimer { at: Millis },
}

impl From<NavigationCommand> for Action {
    fn from(command: NavigationCommand) -> Self {
        match command {
            NavigationCommand::Push(href) => Self::PushLocation(href),
            NavigationCommand::Replace(href) => Self::ReplaceLocation(href),
            NavigationCommand::ScrollToTop => Self::ScrollToTop,
        }
    }
}
