//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! Host input → Event → handle_event → component operations → Actions → Host / Worker
//!                ↑                                                        │
//!                └──────────────── Worker responses ──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`handler`]: Event processing and component wiring
//! - [`state`]: [`AppState`] and view computation
//! - [`runtime`]: [`Runtime`] and the [`Host`] trait

pub mod actions;
pub mod handler;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{
    handle_event, Event, LOAD_FAILURE_MESSAGE, LOAD_SUCCESS_MESSAGE, LOAD_SUCCESS_MS,
};
pub use runtime::{Host, MemoryHost, Runtime};
pub use state::AppState;
