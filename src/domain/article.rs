//! Article domain model.
//!
//! An [`Article`] is the canonical unit of content. It is produced by the
//! content loader from a raw Markdown document and consumed by the filter
//! engine, the routing coordinator and the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable article identifier used in canonical `/post/<id>` paths.
pub type ArticleId = u32;

/// A single blog article.
///
/// All fields are populated: the loader substitutes defaults for anything the
/// source metadata omits, so consumers never deal with partially filled
/// records.
///
/// # Fields
///
/// - `id`: Unique identifier within a loaded collection
/// - `title`: Display title, `"Untitled Post"` when the source has none
/// - `description`: Short summary shown in the list view, may be empty
/// - `content`: Markdown body with the front matter stripped
/// - `date`: Publication date used for sorting and range filtering
/// - `read_time`: Display label such as `"6 min read"`
/// - `tags`: Topic labels in display order, without duplicates
/// - `coming_soon`: Hides date, read time and sharing in the reading view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub date: NaiveDate,
    pub read_time: String,
    pub tags: Vec<String>,
    pub coming_soon: bool,
}

impl Article {
    /// Returns `true` if the article carries `tag` (exact, case-sensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Formats the publication date the way the list view shows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use techblog::Article;
    ///
    /// let article = Article {
    ///     id: 1,
    ///     title: "Hello".to_string(),
    ///     description: String::new(),
    ///     content: String::new(),
    ///     date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
    ///     read_time: "1 min read".to_string(),
    ///     tags: vec![],
    ///     coming_soon: false,
    /// };
    /// assert_eq!(article.display_date(), "April 5, 2025");
    /// ```
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Returns `true` if the reading view should show date and read time.
    #[must_use]
    pub const fn shows_metadata(&self) -> bool {
        !self.coming_soon
    }
}
