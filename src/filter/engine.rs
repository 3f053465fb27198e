//! Pure filtering over the article collection.

use super::state::FilterState;
use crate::domain::Article;

/// Returns the articles matching every active filter, in collection order.
///
/// The three dimensions compose with AND; within the tag selection any one
/// selected tag qualifies an article.
///
/// # Examples
///
/// ```
/// use techblog::filter::{apply_filters, FilterState};
///
/// let filters = FilterState::default();
/// let visible = apply_filters(&[], &filters);
/// assert!(visible.is_empty());
/// ```
#[must_use]
pub fn apply_filters<'a>(articles: &'a [Article], filters: &FilterState) -> Vec<&'a Article> {
    let _span = tracing::debug_span!(
        "apply_filters",
        total = articles.len(),
        tags = filters.tags().len(),
        query_len = filters.search_query().len()
    )
    .entered();

    let query = filters.search_query().to_lowercase();
    let visible: Vec<&Article> = articles
        .iter()
        .filter(|article| {
            matches_tags(article, filters.tags())
                && filters.date_range().contains(article.date)
                && matches_query(article, &query)
        })
        .collect();

    tracing::debug!(visible = visible.len(), "filters applied");
    visible
}

/// Distinct tags across the whole collection, in first-seen order.
///
/// Independent of any filter state, so the tag picker always lists every
/// topic.
#[must_use]
pub fn available_tags(articles: &[Article]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in articles.iter().flat_map(|a| a.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

fn matches_tags(article: &Article, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|tag| article.has_tag(tag))
}

/// `query` must already be lowercased.
fn matches_query(article: &Article, query: &str) -> bool {
    query.is_empty()
        || article.title.to_lowercase().contains(query)
        || article.description.to_lowercase().contains(query)
        || article.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}
