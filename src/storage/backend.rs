//! Preference storage abstraction.
//!
//! The engine persists exactly one value, the theme. The [`PreferenceStore`]
//! trait keeps the application layer independent of where it lives.

use crate::domain::error::Result;
use crate::ui::theme::ThemeMode;

/// Abstraction over preference persistence.
///
/// # Implementations
///
/// - [`JsonPreferenceStore`](crate::storage::JsonPreferenceStore): JSON file
///   with atomic writes
/// - [`MemoryPreferenceStore`](crate::storage::MemoryPreferenceStore):
///   process-local, for tests and hosts without a writable disk
///
/// # Examples
///
/// ```
/// use techblog::storage::{MemoryPreferenceStore, PreferenceStore};
/// use techblog::ui::theme::ThemeMode;
///
/// let mut store = MemoryPreferenceStore::default();
/// store.save_theme(ThemeMode::Dark)?;
/// assert_eq!(store.stored_theme()?.as_deref(), Some("dark"));
/// # Ok::<(), techblog::BlogError>(())
/// ```
pub trait PreferenceStore: Send {
    /// Returns the raw persisted theme value, `Ok(None)` if never written.
    ///
    /// The value is returned unparsed; validation happens during theme
    /// resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn stored_theme(&self) -> Result<Option<String>>;

    /// Persists `mode`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_theme(&mut self, mode: ThemeMode) -> Result<()>;
}
