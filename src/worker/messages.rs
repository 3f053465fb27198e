//! Message types between the application layer and the content worker.
//!
//! Both directions are serializable so a host can move them across a thread
//! or process boundary. Requests carry the caller's trace context so spans
//! created while serving them link back to the originating event.

use crate::domain::Article;
use crate::store::RequestId;
use crate::ui::theme::ThemeMode;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-boundary span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Requests handled by the content worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and parse the whole content source.
    LoadContent {
        /// Token issued by the collection store for this load.
        request: RequestId,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist the theme preference.
    SaveTheme {
        mode: ThemeMode,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub fn load_content(request: RequestId) -> Self {
        Self::LoadContent {
            request,
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub fn save_theme(mode: ThemeMode) -> Self {
        Self::SaveTheme {
            mode,
            trace_context: TraceContext::from_current(),
        }
    }

    pub(crate) fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadContent { trace_context, .. } | Self::SaveTheme { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses from the content worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The content source was read; articles are deduplicated and sorted.
    ContentLoaded {
        request: RequestId,
        articles: Vec<Article>,
    },

    /// The content source could not be read.
    ContentFailed { request: RequestId, message: String },

    ThemeSaved { mode: ThemeMode },

    /// Any other failure, reported for logging only.
    Error { message: String },
}
