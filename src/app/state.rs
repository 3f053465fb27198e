//! Application state and view computation.
//!
//! [`AppState`] aggregates the components of the engine. Each component owns
//! its slice and is mutated only through its own operations; the event
//! handler is the single place that wires them together.
//!
//! # Example
//!
//! ```rust
//! use techblog::app::AppState;
//! use techblog::ui::theme::ThemePreference;
//!
//! let state = AppState::new(ThemePreference::resolve(Some("dark"), false));
//! let view = state.compute_view();
//! assert!(view.articles.is_empty());
//! ```

use crate::domain::Article;
use crate::filter::{apply_filters, available_tags, FilterState};
use crate::notify::{Channel, Millis, NotificationBus};
use crate::routing::{RouteCoordinator, Selection};
use crate::store::CollectionStore;
use crate::ui::theme::ThemePreference;
use crate::ui::viewmodel::{ArticleCard, ArticleDetail, BlogView, NotificationItem, Page, TagChip};

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded collection and load lifecycle.
    pub store: CollectionStore,

    /// Active tag, date and text filters.
    pub filters: FilterState,

    /// Owner of the selection and the address bar projection.
    pub router: RouteCoordinator,

    /// Outcome messages shared by every component.
    pub notifications: NotificationBus,

    pub theme: ThemePreference,

    /// Deadline of the last timer handed to the host.
    pub(crate) scheduled_timer: Option<Millis>,
}

impl AppState {
    #[must_use]
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            store: CollectionStore::new(),
            filters: FilterState::new(),
            router: RouteCoordinator::new(),
            notifications: NotificationBus::new(),
            theme,
            scheduled_timer: None,
        }
    }

    /// Articles passing the current filters, newest first.
    #[must_use]
    pub fn visible_articles(&self) -> Vec<&Article> {
        apply_filters(self.store.articles(), &self.filters)
    }

    /// The article being read, if the selection points at a loaded one.
    #[must_use]
    pub fn selected_article(&self) -> Option<&Article> {
        match self.router.selection() {
            Selection::List => None,
            Selection::Viewing(id) => self.store.get(id),
        }
    }

    /// Computes the snapshot the presentation layer renders.
    ///
    /// The page follows the router's selection. The router only holds
    /// `Viewing(id)` while the store has `id`.
    #[must_use]
    pub fn compute_view(&self) -> BlogView {
        let _span = tracing::trace_span!("compute_view").entered();

        let page = match self.router.selection() {
            Selection::List => Page::List,
            Selection::Viewing(id) => match self.store.get(id) {
                Some(article) => Page::Article(ArticleDetail::from(article)),
                None => {
                    tracing::error!(id, "selected article missing from the store");
                    Page::List
                }
            },
        };

        let tags = available_tags(self.store.articles())
            .into_iter()
            .map(|name| TagChip {
                selected: self.filters.is_tag_selected(&name),
                name,
            })
            .collect();

        BlogView {
            page,
            loading: self.store.is_loading(),
            error: self.store.error().map(ToString::to_string),
            articles: self.visible_articles().into_iter().map(ArticleCard::from).collect(),
            total_articles: self.store.articles().len(),
            tags,
            search_query: self.filters.search_query().to_string(),
            filters_active: self.filters.has_active_filters(),
            alerts: self.channel_items(Channel::Alert),
            toasts: self.channel_items(Channel::Toast),
            theme: self.theme.mode(),
        }
    }

    fn channel_items(&self, channel: Channel) -> Vec<NotificationItem> {
        self.notifications
            .in_channel(channel)
            .map(NotificationItem::from)
            .collect()
    }
}
