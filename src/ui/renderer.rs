//! Plain-text rendering of a [`BlogView`].
//!
//! Used by the headless binary to show what a presentation layer would draw.
//! Notifications that are entering or hidden are skipped, like a UI that
//! fades them.

use crate::notify::NotificationKind;
use crate::ui::viewmodel::{ArticleCard, BlogView, NotificationItem, Page};
use std::fmt::Write;

/// Renders `view` as text.
///
/// # Example
///
/// ```rust,ignore
/// let text = techblog::ui::render(&state.compute_view());
/// println!("{text}");
/// ```
#[must_use]
pub fn render(view: &BlogView) -> String {
    let mut out = String::new();

    for item in view.alerts.iter().filter(|n| n.visible) {
        render_notification(&mut out, item);
    }

    if view.loading {
        out.push_str("Loading articles...\n");
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Could not load articles: {error}");
    }

    match &view.page {
        Page::List => render_list(&mut out, view),
        Page::Article(detail) => {
            render_card_header(&mut out, &detail.card);
            out.push('\n');
            out.push_str(detail.content.trim_end());
            out.push('\n');
        }
    }

    for item in view.toasts.iter().filter(|n| n.visible) {
        render_notification(&mut out, item);
    }

    let _ = writeln!(out, "[theme: {}]", view.theme);
    out
}

fn render_list(out: &mut String, view: &BlogView) {
    if !view.tags.is_empty() {
        let tags: Vec<String> = view
            .tags
            .iter()
            .map(|chip| {
                if chip.selected {
                    format!("[{}]", chip.name)
                } else {
                    chip.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }
    if !view.search_query.is_empty() {
        let _ = writeln!(out, "Search: {}", view.search_query);
    }

    if view.articles.is_empty() && !view.loading {
        if view.filters_active {
            out.push_str("No articles match the current filters.\n");
        } else {
            out.push_str("No articles yet.\n");
        }
        return;
    }

    let _ = writeln!(out, "{} of {} articles", view.articles.len(), view.total_articles);
    for card in &view.articles {
        out.push('\n');
        render_card_header(out, card);
        if !card.description.is_empty() {
            let _ = writeln!(out, "  {}", card.description);
        }
    }
}

fn render_card_header(out: &mut String, card: &ArticleCard) {
    let _ = writeln!(out, "{} ({})", card.title, card.href);
    if card.show_metadata {
        let _ = writeln!(out, "  {} · {}", card.date, card.read_time);
    } else {
        out.push_str("  Coming soon\n");
    }
    if !card.tags.is_empty() {
        let _ = writeln!(out, "  #{}", card.tags.join(" #"));
    }
}

fn render_notification(out: &mut String, item: &NotificationItem) {
    let label = match item.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
        NotificationKind::Warning => "warning",
    };
    let _ = writeln!(out, "[{label}] {}", item.message);
}
