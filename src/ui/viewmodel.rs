//! View snapshot consumed by the presentation layer.
//!
//! A [`BlogView`] is computed from application state via
//! `AppState::compute_view()` and carries display-ready data only: formatted
//! dates, canonical hrefs, tag selection flags, and the visible notifications
//! split by channel.

use crate::domain::{Article, ArticleId};
use crate::notify::{Notification, NotificationId, NotificationKind};
use crate::routing::article_path;
use crate::ui::theme::ThemeMode;
use serde::Serialize;

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub page: Page,

    /// A load is in flight.
    pub loading: bool,

    /// Message of the last failed load.
    pub error: Option<String>,

    /// Filtered list, newest first.
    pub articles: Vec<ArticleCard>,

    /// Number of articles before filtering.
    pub total_articles: usize,

    pub tags: Vec<TagChip>,
    pub search_query: String,
    pub filters_active: bool,

    /// Error notifications, shown top-center.
    pub alerts: Vec<NotificationItem>,

    /// Success, info and warning notifications, shown in a corner stack.
    pub toasts: Vec<NotificationItem>,

    pub theme: ThemeMode,
}

/// The active page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Page {
    List,
    Article(ArticleDetail),
}

/// List row for one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCard {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    /// Long form, e.g. "April 12, 2025".
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub coming_soon: bool,
    /// Whether the date and read time are shown.
    pub show_metadata: bool,
    pub href: String,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            description: article.description.clone(),
            date: article.display_date(),
            read_time: article.read_time.clone(),
            tags: article.tags.clone(),
            coming_soon: article.coming_soon,
            show_metadata: article.shows_metadata(),
            href: article_path(article.id),
        }
    }
}

/// Full article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub card: ArticleCard,
    /// Markdown body.
    pub content: String,
}

impl From<&Article> for ArticleDetail {
    fn from(article: &Article) -> Self {
        Self {
            card: ArticleCard::from(article),
            content: article.content.clone(),
        }
    }
}

/// Entry of the tag picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChip {
    pub name: String,
    pub selected: bool,
}

/// A notification as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationItem {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    /// `false` while entering and while hidden, so both transitions can
    /// animate.
    pub visible: bool,
}

impl From<&Notification> for NotificationItem {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            message: notification.message.clone(),
            visible: notification.is_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_article_on;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 12).unwrap()
    }

    #[test]
    fn card_carries_display_fields() {
        let article = parse_article_on(
            "---\nid: 3\ntitle: Lifetimes\ndate: 2025-04-12\nreadTime: 6 min read\n---\nbody",
            "",
            today(),
        );

        let card = ArticleCard::from(&article);

        assert_eq!(card.date, "April 12, 2025");
        assert_eq!(card.href, "/post/3");
        assert!(card.show_metadata);
    }

    #[test]
    fn coming_soon_article_hides_metadata() {
        let article = parse_article_on(
            "---\nid: 4\ntitle: Async Traits\ncomingSoon: true\n---\n",
            "",
            today(),
        );

        let detail = ArticleDetail::from(&article);

        assert!(detail.card.coming_soon);
        assert!(!detail.card.show_metadata);
    }
}
