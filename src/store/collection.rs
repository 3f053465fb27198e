//! Article collection and load lifecycle.
//!
//! [`CollectionStore`] holds the full, newest-first article collection and the
//! state of the most recent load:
//!
//! ```text
//! Idle ──fetch()──▶ Loading ──complete(Ok)──▶ Ready
//!                      │
//!                      └──complete(Err)─▶ Error
//! ```
//!
//! Loading is asynchronous from the store's point of view: `fetch()` hands out
//! a [`RequestId`] and the host reports the result through `complete()`. Only
//! the most recently issued request is accepted, so an overlapping older load
//! can never overwrite a newer one.

use crate::content::{load_all_articles, ContentSource};
use crate::domain::error::{BlogError, Result};
use crate::domain::{Article, ArticleId};
use serde::{Deserialize, Serialize};

/// Token identifying one `fetch()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Lifecycle of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been requested yet.
    Idle,
    /// A load is in flight; only `request` may complete it.
    Loading { request: RequestId },
    /// The collection is loaded and usable.
    Ready,
    /// The last load failed; the message is kept for display and logging.
    Error { message: String },
}

/// Result of an accepted completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { count: usize },
    Failed { message: String },
}

/// Holds the loaded articles and the load lifecycle.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    articles: Vec<Article>,
    state: LoadState,
    next_request: u64,
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            articles: Vec::new(),
            state: LoadState::Idle,
            next_request: 1,
        }
    }

    /// Starts a load and returns its request token.
    ///
    /// Previously loaded articles stay available while the new load runs, so a
    /// reload does not blank the list. Calling `fetch()` again while loading
    /// supersedes the earlier request.
    pub fn fetch(&mut self) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request += 1;

        if let LoadState::Loading { request: previous } = self.state {
            tracing::debug!(
                previous = previous.value(),
                request = request.value(),
                "superseding in-flight load"
            );
        }

        self.state = LoadState::Loading { request };
        tracing::debug!(request = request.value(), "collection load started");
        request
    }

    /// Completes a load started by [`fetch`](Self::fetch).
    ///
    /// # Returns
    ///
    /// - `Some(LoadOutcome)` if `request` is the current in-flight request
    /// - `None` if the completion is stale and was discarded
    pub fn complete(
        &mut self,
        request: RequestId,
        result: Result<Vec<Article>>,
    ) -> Option<LoadOutcome> {
        let _span = tracing::debug_span!("collection_complete", request = request.value()).entered();

        if self.state != (LoadState::Loading { request }) {
            tracing::debug!(state = ?self.state, "discarding stale load completion");
            return None;
        }

        match result {
            Ok(articles) => {
                let count = articles.len();
                self.articles = articles;
                self.state = LoadState::Ready;
                tracing::info!(count, "collection ready");
                Some(LoadOutcome::Ready { count })
            }
            Err(e) => {
                let message = e.to_string();
                self.articles.clear();
                self.state = LoadState::Error {
                    message: message.clone(),
                };
                tracing::error!(error = %message, "collection load failed");
                Some(LoadOutcome::Failed { message })
            }
        }
    }

    /// Loads synchronously from `source`: `fetch()` followed by `complete()`.
    pub fn fetch_from(&mut self, source: &dyn ContentSource) -> LoadOutcome {
        let request = self.fetch();
        let result = load_all_articles(source);
        self.complete(request, result).unwrap_or_else(|| LoadOutcome::Failed {
            message: BlogError::Content("load superseded".to_string()).to_string(),
        })
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// The error message of the last failed load, if the store is in `Error`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// All loaded articles, newest first.
    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    #[must_use]
    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }
}
