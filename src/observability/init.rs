//! Subscriber setup: `tracing` macros to OpenTelemetry to the trace file.

use super::exporter::{self, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level` (default `"info"`), spans go to
/// `config.trace_file` or the default trace path. Tracing is optional, so any
/// failure leaves the process without a subscriber instead of erroring, and
/// only the first call takes effect.
///
/// ```rust
/// use techblog::observability::init_tracing;
/// use techblog::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     trace_file: Some(dir.path().join("otlp.json")),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let trace_file = config
        .trace_file
        .clone()
        .unwrap_or_else(crate::infrastructure::trace_path);

    if let Some(parent) = trace_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SCOPE_NAME,
    )]);
    let provider = exporter::create_tracer_provider(trace_file, resource);
    let tracer = provider.tracer(SCOPE_NAME);
    let _ = opentelemetry::global::set_tracer_provider(provider);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
