//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place where components interact:
//!
//! 1. Events arrive from the host or as worker responses
//! 2. The handler calls the owning component's operation
//! 3. Outcome notifications are raised on the shared bus
//! 4. Side effects are returned as [`Action`]s
//!
//! # Example
//!
//! ```rust
//! use techblog::app::{handle_event, Action, AppState, Event};
//! use techblog::ui::theme::ThemePreference;
//!
//! let mut state = AppState::new(ThemePreference::default());
//! let (render, actions) = handle_event(
//!     &mut state,
//!     &Event::Mount { href: "/".to_string() },
//!     0,
//! );
//! assert!(render);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::BlogError;
use crate::domain::{Article, ArticleId};
use crate::filter::DateRange;
use crate::notify::{Millis, NotificationId, NotificationKind};
use crate::routing::NavigationCommand;
use crate::store::{LoadOutcome, RequestId};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Message shown when a load succeeds.
pub const LOAD_SUCCESS_MESSAGE: &str = "Blog posts loaded successfully";

/// How long the load success message stays up.
pub const LOAD_SUCCESS_MS: Millis = 3000;

/// Message shown when a load fails; it stays until dismissed.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to fetch blog posts";

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The application starts at `href`. Starts the first load.
    Mount { href: String },

    /// The host's address bar changed (back/forward, typed URL).
    LocationChanged { href: String },

    /// Load the collection again.
    Reload,

    /// The user picked an article from the list.
    SelectArticle { id: ArticleId },

    /// The user asked for the list.
    Back,

    ToggleTag(String),
    SetDateRange(DateRange),
    SetSearchQuery(String),
    ClearFilters,

    ToggleTheme,

    DismissNotification(NotificationId),

    /// A timer scheduled through [`Action::ScheduleTimer`] fired.
    Tick,

    /// Completion of a [`WorkerMessage`].
    WorkerResponse(WorkerResponse),
}

/// Processes an event and returns whether to re-render plus the actions to
/// execute.
///
/// # Parameters
///
/// * `state` - Application state
/// * `event` - Event to process
/// * `now` - Host clock in milliseconds
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be executed in order. When the
/// notification deadline moved, the last action is a
/// [`Action::ScheduleTimer`].
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event, now: Millis) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, now).entered();

    let (render, mut actions) = match event {
        Event::Mount { href } => {
            let request = state.store.fetch();
            let mut actions = vec![Action::PostToWorker(WorkerMessage::load_content(request))];
            actions.extend(navigation(state.router.on_location_changed(
                href,
                &state.store,
                &mut state.notifications,
                now,
            )));
            (true, actions)
        }
        Event::LocationChanged { href } => {
            let commands = state.router.on_location_changed(
                href,
                &state.store,
                &mut state.notifications,
                now,
            );
            (true, navigation(commands))
        }
        Event::Reload => {
            let request = state.store.fetch();
            (true, vec![Action::PostToWorker(WorkerMessage::load_content(request))])
        }
        Event::SelectArticle { id } => {
            let commands = state
                .router
                .select(*id, &state.store, &mut state.notifications, now);
            (!commands.is_empty(), navigation(commands))
        }
        Event::Back => (true, navigation(state.router.go_back())),
        Event::ToggleTag(tag) => {
            state.filters.toggle_tag(tag);
            (true, vec![])
        }
        Event::SetDateRange(range) => {
            state.filters.set_date_range(*range);
            (true, vec![])
        }
        Event::SetSearchQuery(query) => {
            state.filters.set_search_query(query.clone());
            (true, vec![])
        }
        Event::ClearFilters => {
            state.filters.clear_all(&mut state.notifications, now);
            (true, vec![])
        }
        Event::ToggleTheme => {
            let mode = state.theme.toggle();
            (true, vec![Action::PostToWorker(WorkerMessage::save_theme(mode))])
        }
        Event::DismissNotification(id) => (state.notifications.dismiss(*id, now), vec![]),
        Event::Tick => {
            // The timer that produced this tick is spent.
            state.scheduled_timer = None;
            state.notifications.advance(now);
            (true, vec![])
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response, now),
    };

    if let Some(timer) = reschedule(state) {
        actions.push(timer);
    }

    tracing::debug!(render, action_count = actions.len(), "event handled");
    (render, actions)
}

fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
    now: Millis,
) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::ContentLoaded { request, articles } => {
            complete_load(state, *request, Ok(articles.clone()), now)
        }
        WorkerResponse::ContentFailed { request, message } => complete_load(
            state,
            *request,
            Err(BlogError::Worker(message.clone())),
            now,
        ),
        WorkerResponse::ThemeSaved { mode } => {
            tracing::debug!(mode = %mode, "theme preference persisted");
            (false, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "worker reported an error");
            (false, vec![])
        }
    }
}

fn complete_load(
    state: &mut AppState,
    request: RequestId,
    result: crate::Result<Vec<Article>>,
    now: Millis,
) -> (bool, Vec<Action>) {
    match state.store.complete(request, result) {
        None => (false, vec![]),
        Some(LoadOutcome::Ready { count }) => {
            tracing::info!(count, "blog posts loaded");
            state.notifications.raise(
                NotificationKind::Success,
                LOAD_SUCCESS_MESSAGE,
                LOAD_SUCCESS_MS,
                now,
            );
            let commands =
                state
                    .router
                    .on_collection_ready(&state.store, &mut state.notifications, now);
            (true, navigation(commands))
        }
        Some(LoadOutcome::Failed { message }) => {
            tracing::error!(error = %message, "blog posts could not be loaded");
            state
                .notifications
                .raise(NotificationKind::Error, LOAD_FAILURE_MESSAGE, 0, now);
            (true, navigation(state.router.on_collection_failed()))
        }
    }
}

fn navigation(commands: Vec<NavigationCommand>) -> Vec<Action> {
    commands.into_iter().map(Action::from).collect()
}

/// Returns a timer action if the next notification deadline differs from
/// the one the host already has.
fn reschedule(state: &mut AppState) -> Option<Action> {
    let deadline = state.notifications.next_deadline();
    if deadline == state.scheduled_timer {
        return None;
    }
    state.scheduled_timer = deadline;
    deadline.map(|at| Action::ScheduleTimer { at })
}
