//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK → FileSpanExporter → otlp.json
//! ```
//!
//! Traces land in `$XDG_DATA_HOME/techblog/otlp.json` unless the config
//! names another file. The file rotates at 10MB and keeps three backups.
//! Worker messages carry a [`TraceContext`](crate::worker::TraceContext) so
//! worker spans nest under the span that posted the message.

mod exporter;
mod file_writer;
mod init;

pub use init::init_tracing;
