//! In-memory preference store.

use crate::domain::error::Result;
use crate::storage::backend::PreferenceStore;
use crate::ui::theme::ThemeMode;

/// Preferences that live only as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    theme: Option<String>,
}

impl MemoryPreferenceStore {
    /// Starts with a raw stored value, as if read from disk.
    #[must_use]
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn stored_theme(&self) -> Result<Option<String>> {
        Ok(self.theme.clone())
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<()> {
        self.theme = Some(mode.as_str().to_string());
        Ok(())
    }
}
