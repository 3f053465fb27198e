//! Filter state and its mutators.
//!
//! [`FilterState`] has three independent slices: selected tags, a date range,
//! and a search query. Each mutator replaces only its own slice.

use crate::notify::{Millis, NotificationBus, NotificationKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How long the "Filters cleared" confirmation stays up.
pub const FILTERS_CLEARED_MS: Millis = 2000;

/// Inclusive calendar-date range; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `date` lies within both bounds.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Composable filter configuration over the article collection.
///
/// The default value matches every article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    tags: Vec<String>,
    date_range: DateRange,
    search_query: String,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected tags in selection order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub const fn date_range(&self) -> DateRange {
        self.date_range
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Adds `tag` to the selection, or removes it if already selected.
    ///
    /// Returns `true` if the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            tracing::debug!(tag, "tag filter removed");
            false
        } else {
            self.tags.push(tag.to_string());
            tracing::debug!(tag, "tag filter added");
            true
        }
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        tracing::debug!(start = ?range.start, end = ?range.end, "date range updated");
        self.date_range = range;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        tracing::trace!(query = %self.search_query, "search query updated");
    }

    /// Resets every slice and confirms with an info notification.
    pub fn clear_all(&mut self, bus: &mut NotificationBus, now: Millis) {
        *self = Self::default();
        bus.raise(NotificationKind::Info, "Filters cleared", FILTERS_CLEARED_MS, now);
    }

    /// Returns `true` if any slice differs from its default.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.tags.is_empty() || !self.date_range.is_unbounded() || !self.search_query.is_empty()
    }
}
