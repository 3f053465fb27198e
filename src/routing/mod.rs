//! Selection and address bar coordination.
//!
//! - [`location`]: parsing hrefs and interpreting them as routes
//! - [`coordinator`]: [`RouteCoordinator`], the owner of the [`Selection`]

pub mod coordinator;
pub mod location;

pub use coordinator::{
    NavigationCommand, RouteCoordinator, Selection, PAGE_NOT_FOUND_MS, SELECTION_MISS_MS,
};
pub use location::{article_path, Location, Route, ARTICLE_PREFIX, NOT_FOUND_PARAM};
