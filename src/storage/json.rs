//! JSON file-based preference store.
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! target, so a crash never leaves a truncated document behind.

use crate::domain::error::{BlogError, Result};
use crate::storage::backend::PreferenceStore;
use crate::storage::models::{PreferencesRecord, PREFERENCES_VERSION};
use crate::ui::theme::ThemeMode;
use std::path::{Path, PathBuf};

/// Preferences stored in a human-readable JSON file.
///
/// The document is read once on creation and rewritten on every change.
pub struct JsonPreferenceStore {
    file_path: PathBuf,
    data: PreferencesRecord,
}

impl JsonPreferenceStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file yields empty preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but cannot be read or is not valid JSON
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use techblog::storage::JsonPreferenceStore;
    ///
    /// let store = JsonPreferenceStore::new("/tmp/techblog/preferences.json")?;
    /// # Ok::<(), techblog::BlogError>(())
    /// ```
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        let _span = tracing::debug_span!("json_preferences_open", path = ?file_path).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no preferences file yet");
            PreferencesRecord::default()
        };

        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<PreferencesRecord> {
        let contents = std::fs::read_to_string(path)?;
        let data: PreferencesRecord = serde_json::from_str(&contents)
            .map_err(|e| BlogError::Storage(format!("failed to parse preferences: {e}")))?;

        if data.version != PREFERENCES_VERSION {
            tracing::warn!(
                found = data.version,
                expected = PREFERENCES_VERSION,
                "preferences written by a different version"
            );
        }
        tracing::debug!(theme = ?data.theme, "loaded preferences");
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| BlogError::Storage(format!("failed to serialize preferences: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn stored_theme(&self) -> Result<Option<String>> {
        Ok(self.data.theme.clone())
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<()> {
        let _span = tracing::debug_span!("json_save_theme", mode = %mode).entered();

        self.data.version = PREFERENCES_VERSION;
        self.data.theme = Some(mode.as_str().to_string());
        self.save_to_file()
    }
}
