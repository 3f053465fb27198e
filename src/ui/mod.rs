//! Presentation-facing layer.
//!
//! ```text
//! AppState → compute_view → BlogView → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View snapshot types
//! - [`renderer`]: Plain-text rendering of a snapshot
//! - [`theme`]: Light/dark mode resolution

pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{ThemeMode, ThemePreference};
pub use viewmodel::{ArticleCard, ArticleDetail, BlogView, NotificationItem, Page, TagChip};
