//! Content worker for the operations that block: reading the content source
//! and writing preferences.
//!
//! - `messages`: Request/response types with trace context propagation
//! - `handler`: [`ContentWorker`] and message processing

pub mod handler;
pub mod messages;

pub use handler::ContentWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
