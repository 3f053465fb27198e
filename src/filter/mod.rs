//! Filter engine: composable tag, date and text filters over the collection.
//!
//! - [`state`]: [`FilterState`] and its mutators
//! - [`engine`]: the pure [`apply_filters`] transform and [`available_tags`]

pub mod engine;
pub mod state;

pub use engine::{apply_filters, available_tags};
pub use state::{DateRange, FilterState, FILTERS_CLEARED_MS};
