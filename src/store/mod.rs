//! Collection store: the loaded article set and its load lifecycle.

pub mod collection;

pub use collection::{CollectionStore, LoadOutcome, LoadState, RequestId};
