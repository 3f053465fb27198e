//! Keeps the selected article and the address bar consistent.
//!
//! The coordinator owns the [`Selection`]. Every input (a location change, the
//! collection becoming ready, an explicit selection) funnels into one
//! reconciliation pass that derives the selection from the current location
//! and returns the [`NavigationCommand`]s the host must apply.

use super::location::{article_path, Location, Route, ARTICLE_PREFIX};
use crate::domain::ArticleId;
use crate::notify::{Millis, NotificationBus, NotificationKind};
use crate::store::CollectionStore;

/// How long "Post with ID .. not found" stays up.
pub const SELECTION_MISS_MS: Millis = 3000;

/// How long "Page not found: .." stays up.
pub const PAGE_NOT_FOUND_MS: Millis = 3000;

/// Which view is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    List,
    Viewing(ArticleId),
}

/// Side effects on the address bar and viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Add a history entry.
    Push(String),
    /// Overwrite the current history entry.
    Replace(String),
    ScrollToTop,
}

#[derive(Debug, Clone, Default)]
pub struct RouteCoordinator {
    selection: Selection,
    location: Location,
    pending: Option<String>,
}

impl RouteCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// The location as last observed or rewritten.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Article token waiting for the collection to become ready.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Handles a mount or a navigation the host observed (back/forward,
    /// typed URL, initial load).
    pub fn on_location_changed(
        &mut self,
        href: &str,
        store: &CollectionStore,
        bus: &mut NotificationBus,
        now: Millis,
    ) -> Vec<NavigationCommand> {
        self.location = Location::parse(href);
        self.reconcile(store, bus, now)
    }

    /// Re-runs reconciliation after the store transitioned into ready.
    pub fn on_collection_ready(
        &mut self,
        store: &CollectionStore,
        bus: &mut NotificationBus,
        now: Millis,
    ) -> Vec<NavigationCommand> {
        self.reconcile(store, bus, now)
    }

    /// Settles in the list after a load failed.
    ///
    /// The store holds no articles, so neither the current selection nor a
    /// pending token can resolve. The load failure is already reported, so
    /// no notification is raised here.
    pub fn on_collection_failed(&mut self) -> Vec<NavigationCommand> {
        let mut commands = Vec::new();
        let pending = self.pending.take();
        if pending.is_none() && self.selection == Selection::List {
            return commands;
        }

        tracing::debug!(pending = ?pending, from = ?self.selection, "no articles after failed load");
        self.replace(Location::root(), &mut commands);
        self.show_list();
        commands
    }

    /// Opens article `id` by navigating to its canonical path.
    pub fn select(
        &mut self,
        id: ArticleId,
        store: &CollectionStore,
        bus: &mut NotificationBus,
        now: Millis,
    ) -> Vec<NavigationCommand> {
        let href = article_path(id);
        if self.selection == Selection::Viewing(id) && self.location.path() == href {
            return Vec::new();
        }

        self.location = Location::parse(&href);
        let mut commands = vec![NavigationCommand::Push(href)];
        commands.extend(self.reconcile(store, bus, now));
        commands
    }

    /// Returns to the list from anywhere.
    pub fn go_back(&mut self) -> Vec<NavigationCommand> {
        tracing::debug!(from = ?self.selection, "returning to list");
        self.location = Location::root();
        self.pending = None;
        self.selection = Selection::List;
        vec![NavigationCommand::Push(self.location.to_href())]
    }

    fn reconcile(
        &mut self,
        store: &CollectionStore,
        bus: &mut NotificationBus,
        now: Millis,
    ) -> Vec<NavigationCommand> {
        let _span = tracing::debug_span!(
            "reconcile",
            location = %self.location,
            ready = store.is_ready()
        )
        .entered();

        let mut commands = Vec::new();
        let token = match Route::from_location(&self.location) {
            Route::List => {
                self.pending = None;
                self.show_list();
                return commands;
            }
            Route::NotFound { path } => {
                tracing::warn!(path = %path, "host reported an unmatched path");
                bus.raise(
                    NotificationKind::Error,
                    format!("Page not found: {path}"),
                    PAGE_NOT_FOUND_MS,
                    now,
                );
                self.pending = None;
                self.replace(Location::root(), &mut commands);
                self.show_list();
                return commands;
            }
            Route::Article { token } => token,
            Route::LegacyArticle { token } => {
                tracing::debug!(token = %token, "rewriting legacy redirect");
                self.replace(Location::parse(&format!("{ARTICLE_PREFIX}{token}")), &mut commands);
                token
            }
        };

        if !store.is_ready() {
            tracing::debug!(token = %token, "collection not ready, deferring selection");
            self.pending = Some(token);
            return commands;
        }
        self.pending = None;

        let found = token.parse::<ArticleId>().ok().filter(|id| store.get(*id).is_some());
        match found {
            Some(id) => {
                let canonical = article_path(id);
                if self.location.path() != canonical {
                    self.replace(Location::parse(&canonical), &mut commands);
                }
                if self.selection != Selection::Viewing(id) {
                    tracing::info!(id, "viewing article");
                    self.selection = Selection::Viewing(id);
                    commands.push(NavigationCommand::ScrollToTop);
                }
            }
            None => {
                tracing::warn!(token = %token, "requested article does not exist");
                bus.raise(
                    NotificationKind::Error,
                    format!("Post with ID {token} not found"),
                    SELECTION_MISS_MS,
                    now,
                );
                self.replace(Location::root(), &mut commands);
                self.show_list();
            }
        }
        commands
    }

    /// Records `target` as the current location so the rewrite does not
    /// trigger another pass when the host echoes it back.
    fn replace(&mut self, target: Location, commands: &mut Vec<NavigationCommand>) {
        if self.location != target {
            commands.push(NavigationCommand::Replace(target.to_href()));
            self.location = target;
        }
    }

    fn show_list(&mut self) {
        if self.selection != Selection::List {
            tracing::debug!(from = ?self.selection, "showing list");
            self.selection = Selection::List;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticSource;
    use crate::notify::Channel;

    fn ready_store(ids: &[ArticleId]) -> CollectionStore {
        let source = ids.iter().fold(StaticSource::default(), |source, id| {
            source.with(
                format!("post-{id}"),
                format!("---\nid: {id}\ntitle: Post {id}\ndate: 2025-04-01\n---\nbody"),
            )
        });
        let mut store = CollectionStore::new();
        store.fetch_from(&source);
        assert!(store.is_ready());
        store
    }

    fn errors(bus: &NotificationBus) -> Vec<String> {
        bus.in_channel(Channel::Alert).map(|n| n.message.clone()).collect()
    }

    #[test]
    fn canonical_path_selects_article_and_scrolls() {
        let store = ready_store(&[7]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.on_location_changed("/post/7", &store, &mut bus, 0);

        assert_eq!(router.selection(), Selection::Viewing(7));
        assert_eq!(commands, vec![NavigationCommand::ScrollToTop]);
        assert!(bus.is_empty());
    }

    #[test]
    fn re_entering_the_same_article_is_a_no_op() {
        let store = ready_store(&[7]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();
        router.on_location_changed("/post/7", &store, &mut bus, 0);

        assert!(router.on_location_changed("/post/7", &store, &mut bus, 1).is_empty());
        assert!(router.select(7, &store, &mut bus, 2).is_empty());
        assert_eq!(router.selection(), Selection::Viewing(7));
    }

    #[test]
    fn missing_article_notifies_once_and_returns_to_root() {
        let store = ready_store(&[1, 2]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.on_location_changed("/post/999999", &store, &mut bus, 0);

        assert_eq!(router.selection(), Selection::List);
        assert_eq!(commands, vec![NavigationCommand::Replace("/".to_string())]);
        assert_eq!(errors(&bus), vec!["Post with ID 999999 not found"]);

        // Host echoes the rewrite back.
        router.on_location_changed("/", &store, &mut bus, 1);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn non_numeric_token_is_treated_as_a_miss() {
        let store = ready_store(&[1]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        router.on_location_changed("/post/abc", &store, &mut bus, 0);

        assert_eq!(router.selection(), Selection::List);
        assert_eq!(router.location(), &Location::root());
        assert_eq!(errors(&bus), vec!["Post with ID abc not found"]);
    }

    #[test]
    fn legacy_redirect_is_rewritten_before_resolution() {
        let store = ready_store(&[3]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.on_location_changed("/?/post/3", &store, &mut bus, 0);

        assert_eq!(
            commands,
            vec![
                NavigationCommand::Replace("/post/3".to_string()),
                NavigationCommand::ScrollToTop
            ]
        );
        assert_eq!(router.selection(), Selection::Viewing(3));
        assert_eq!(router.location().to_href(), "/post/3");
        assert!(bus.is_empty());
    }

    #[test]
    fn non_canonical_id_is_normalized() {
        let store = ready_store(&[7]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.on_location_changed("/post/007", &store, &mut bus, 0);

        assert_eq!(commands[0], NavigationCommand::Replace("/post/7".to_string()));
        assert_eq!(router.selection(), Selection::Viewing(7));
    }

    #[test]
    fn failed_load_returns_an_open_article_to_the_list() {
        let store = ready_store(&[8]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();
        router.on_location_changed("/post/8", &store, &mut bus, 0);

        let commands = router.on_collection_failed();

        assert_eq!(commands, vec![NavigationCommand::Replace("/".to_string())]);
        assert_eq!(router.selection(), Selection::List);
        assert!(router.location().is_root());
        assert!(bus.is_empty());

        assert!(router.on_collection_failed().is_empty());
    }

    #[test]
    fn failed_load_drops_the_pending_token() {
        let mut store = CollectionStore::new();
        store.fetch();
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();
        router.on_location_changed("/post/5", &store, &mut bus, 0);

        let commands = router.on_collection_failed();

        assert_eq!(commands, vec![NavigationCommand::Replace("/".to_string())]);
        assert_eq!(router.pending(), None);
        assert_eq!(router.selection(), Selection::List);
    }

    #[test]
    fn resolution_waits_for_the_collection() {
        let mut store = CollectionStore::new();
        let request = store.fetch();
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.on_location_changed("/post/5", &store, &mut bus, 0);
        assert!(commands.is_empty());
        assert_eq!(router.selection(), Selection::List);
        assert_eq!(router.pending(), Some("5"));
        assert!(bus.is_empty());

        let loaded = ready_store(&[5]).articles().to_vec();
        store.complete(request, Ok(loaded));

        let commands = router.on_collection_ready(&store, &mut bus, 10);
        assert_eq!(commands, vec![NavigationCommand::ScrollToTop]);
        assert_eq!(router.selection(), Selection::Viewing(5));
        assert_eq!(router.pending(), None);
    }

    #[test]
    fn not_found_signal_names_the_path_and_is_stripped() {
        let store = ready_store(&[1]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.on_location_changed("/?notFound=%2Fdrafts%2Fx", &store, &mut bus, 0);

        assert_eq!(commands, vec![NavigationCommand::Replace("/".to_string())]);
        assert_eq!(errors(&bus), vec!["Page not found: /drafts/x"]);
        assert_eq!(router.selection(), Selection::List);
    }

    #[test]
    fn select_pushes_canonical_path() {
        let store = ready_store(&[4, 5]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();

        let commands = router.select(5, &store, &mut bus, 0);

        assert_eq!(
            commands,
            vec![
                NavigationCommand::Push("/post/5".to_string()),
                NavigationCommand::ScrollToTop
            ]
        );
        assert_eq!(router.selection(), Selection::Viewing(5));
    }

    #[test]
    fn go_back_always_pushes_root() {
        let store = ready_store(&[4]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();
        router.select(4, &store, &mut bus, 0);

        assert_eq!(router.go_back(), vec![NavigationCommand::Push("/".to_string())]);
        assert_eq!(router.selection(), Selection::List);
        assert_eq!(router.go_back(), vec![NavigationCommand::Push("/".to_string())]);
    }

    #[test]
    fn reload_drops_a_vanished_article() {
        let mut store = ready_store(&[8]);
        let mut bus = NotificationBus::new();
        let mut router = RouteCoordinator::new();
        router.on_location_changed("/post/8", &store, &mut bus, 0);

        let request = store.fetch();
        store.complete(request, Ok(Vec::new()));
        router.on_collection_ready(&store, &mut bus, 5);

        assert_eq!(router.selection(), Selection::List);
        assert_eq!(errors(&bus), vec!["Post with ID 8 not found"]);
    }
}
