//! Content worker: performs the blocking I/O the application layer requests.
//!
//! The worker owns the content source and the preference store. The
//! application layer never touches either directly; it posts
//! [`WorkerMessage`]s and receives [`WorkerResponse`]s back as events.

use crate::content::{load_all_articles, ContentSource};
use crate::domain::error::Result;
use crate::storage::PreferenceStore;
use crate::store::RequestId;
use crate::ui::theme::ThemeMode;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Serves content loads and preference writes.
pub struct ContentWorker {
    source: Box<dyn ContentSource>,
    preferences: Box<dyn PreferenceStore>,
}

impl ContentWorker {
    #[must_use]
    pub fn new(source: Box<dyn ContentSource>, preferences: Box<dyn PreferenceStore>) -> Self {
        Self {
            source,
            preferences,
        }
    }

    /// Raw stored theme, for startup resolution.
    ///
    /// Read failures are logged and treated as "no preference".
    #[must_use]
    pub fn stored_theme(&self) -> Option<String> {
        self.preferences.stored_theme().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read theme preference");
            None
        })
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadContent { request, .. } => self.handle_load_content(request),
            WorkerMessage::SaveTheme { mode, .. } => self.handle_save_theme(mode),
        }
    }

    fn handle_load_content(&self, request: RequestId) -> WorkerResponse {
        match load_all_articles(self.source.as_ref()) {
            Ok(articles) => {
                tracing::debug!(request = request.value(), count = articles.len(), "content loaded");
                WorkerResponse::ContentLoaded { request, articles }
            }
            Err(e) => {
                tracing::warn!(request = request.value(), error = %e, "content load failed");
                WorkerResponse::ContentFailed {
                    request,
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_save_theme(&mut self, mode: ThemeMode) -> WorkerResponse {
        respond("save theme", self.preferences.save_theme(mode), |()| {
            WorkerResponse::ThemeSaved { mode }
        })
    }
}

fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
where
    F: FnOnce(T) -> WorkerResponse,
{
    match result {
        Ok(value) => on_success(value),
        Err(e) => {
            tracing::warn!(operation, error = %e, "worker operation failed");
            WorkerResponse::Error {
                message: format!("{operation}: {e}"),
            }
        }
    }
}

/// Re-attaches the sender's span as the remote parent of the worker span.
///
/// The returned guard must be held while the message is processed.
fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{
        SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
    };

    let trace_context = message.trace_context()?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );

    Some(
        opentelemetry::Context::current()
            .with_remote_span_context(span_context)
            .attach(),
    )
}
