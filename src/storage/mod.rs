//! Storage layer for the persisted user preferences.
//!
//! # Modules
//!
//! - `backend`: [`PreferenceStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: process-local implementation
//! - `models`: on-disk record types

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::PreferenceStore;
pub use json::JsonPreferenceStore;
pub use memory::MemoryPreferenceStore;
pub use models::{PreferencesRecord, PREFERENCES_VERSION};
