//! Executes actions against a host environment.
//!
//! ```text
//! host event ──▶ Runtime::dispatch ──▶ handle_event ──▶ actions
//!                                                        │
//!         ┌────────────── Host (address bar, timers) ◀───┤
//!         │                                              │
//!         └── Runtime::run_worker ◀── worker outbox ◀────┘
//!                    │
//!                    └──▶ Event::WorkerResponse ──▶ handle_event
//! ```
//!
//! Worker messages are queued, not run inline, so a host decides when the
//! blocking work happens and overlapping loads behave like they would with a
//! real background worker.

use crate::app::{handle_event, Action, AppState, Event};
use crate::notify::Millis;
use crate::ui::viewmodel::BlogView;
use crate::worker::{ContentWorker, WorkerMessage};
use std::collections::VecDeque;

/// Environment the engine runs in.
pub trait Host {
    /// Adds a history entry and shows `href` in the address bar.
    fn push_location(&mut self, href: &str);

    /// Replaces the current history entry with `href`.
    fn replace_location(&mut self, href: &str);

    fn scroll_to_top(&mut self);

    /// Arranges for [`Event::Tick`] to be dispatched at `at`. Supersedes any
    /// earlier request.
    fn schedule_timer(&mut self, at: Millis);
}

/// Host that records every effect, for headless runs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHost {
    /// Address bar history, oldest first.
    pub history: Vec<String>,
    pub scrolls: usize,
    /// Currently scheduled timer.
    pub timer: Option<Millis>,
}

impl MemoryHost {
    /// Starts with `href` in the address bar.
    #[must_use]
    pub fn at(href: impl Into<String>) -> Self {
        Self {
            history: vec![href.into()],
            ..Self::default()
        }
    }

    /// Current address bar contents.
    #[must_use]
    pub fn location(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }
}

impl Host for MemoryHost {
    fn push_location(&mut self, href: &str) {
        self.history.push(href.to_string());
    }

    fn replace_location(&mut self, href: &str) {
        match self.history.last_mut() {
            Some(current) => href.clone_into(current),
            None => self.history.push(href.to_string()),
        }
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn schedule_timer(&mut self, at: Millis) {
        self.timer = Some(at);
    }
}

/// Owns the state, the worker and the host, and runs the event loop.
pub struct Runtime<H: Host> {
    state: AppState,
    worker: ContentWorker,
    host: H,
    outbox: VecDeque<WorkerMessage>,
}

impl<H: Host> Runtime<H> {
    #[must_use]
    pub fn new(state: AppState, worker: ContentWorker, host: H) -> Self {
        Self {
            state,
            worker,
            host,
            outbox: VecDeque::new(),
        }
    }

    /// Handles one event and executes its actions.
    ///
    /// Returns `true` if the view should be re-rendered.
    pub fn dispatch(&mut self, event: Event, now: Millis) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event, now);
        for action in actions {
            self.execute_action(action);
        }
        render
    }

    /// Serves every queued worker message and dispatches the responses.
    ///
    /// Messages posted while responses are handled are served in the same
    /// call. Returns `true` if any response asked for a re-render.
    pub fn run_worker(&mut self, now: Millis) -> bool {
        let mut render = false;
        while let Some(message) = self.outbox.pop_front() {
            let response = self.worker.handle_message(message);
            render |= self.dispatch(Event::WorkerResponse(response), now);
        }
        render
    }

    /// Number of worker messages waiting to be served.
    #[must_use]
    pub fn pending_messages(&self) -> usize {
        self.outbox.len()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn view(&self) -> BlogView {
        self.state.compute_view()
    }

    fn execute_action(&mut self, action: Action) {
        tracing::trace!(action = ?action, "executing action");
        match action {
            Action::PostToWorker(message) => self.outbox.push_back(message),
            Action::PushLocation(href) => self.host.push_location(&href),
            Action::ReplaceLocation(href) => self.host.replace_location(&href),
            Action::ScrollToTop => self.host.scroll_to_top(),
            Action::ScheduleTimer { at } => self.host.schedule_timer(at),
        }
    }
}

impl Runtime<MemoryHost> {
    /// Advances the host clock to `now`, firing every timer that falls due
    /// on the way.
    pub fn advance_to(&mut self, now: Millis) {
        while let Some(at) = self.host.timer.filter(|at| *at <= now) {
            self.host.timer = None;
            self.dispatch(Event::Tick, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticSource;
    use crate::storage::MemoryPreferenceStore;
    use crate::ui::theme::ThemePreference;

    fn runtime(href: &str) -> Runtime<MemoryHost> {
        let source = StaticSource::default()
            .with("3", "---\ntitle: Three\ndate: 2025-03-01\n---\nthree")
            .with("5", "---\ntitle: Five\ndate: 2025-05-01\n---\nfive");
        let worker = ContentWorker::new(Box::new(source), Box::new(MemoryPreferenceStore::default()));
        Runtime::new(AppState::new(ThemePreference::default()), worker, MemoryHost::at(href))
    }

    #[test]
    fn worker_messages_wait_for_run_worker() {
        let mut rt = runtime("/");
        rt.dispatch(Event::Mount { href: "/".into() }, 0);

        assert_eq!(rt.pending_messages(), 1);
        assert!(rt.state().store.is_loading());

        assert!(rt.run_worker(20));
        assert_eq!(rt.pending_messages(), 0);
        assert_eq!(rt.view().articles.len(), 2);
    }

    #[test]
    fn replace_rewrites_the_current_entry() {
        let mut rt = runtime("/?/post/3");
        rt.dispatch(Event::Mount { href: "/?/post/3".into() }, 0);

        assert_eq!(rt.host().history, vec!["/post/3"]);
        rt.run_worker(5);
        assert_eq!(rt.host().scrolls, 1);
    }

    #[test]
    fn advance_to_fires_every_due_timer() {
        let mut rt = runtime("/");
        rt.dispatch(Event::Mount { href: "/".into() }, 0);
        rt.run_worker(0);
        assert_eq!(rt.host().timer, Some(10));

        rt.advance_to(3_300);

        assert!(rt.state().notifications.is_empty());
        assert_eq!(rt.host().timer, None);
    }
}
