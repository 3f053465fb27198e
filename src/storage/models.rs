//! On-disk record for user preferences.
//!
//! Kept separate from [`crate::ui::theme::ThemeMode`] so an unrecognized value
//! written by another version still loads and can be ignored during
//! resolution instead of failing the whole document.

use serde::{Deserialize, Serialize};

/// Current version of the preferences document.
pub const PREFERENCES_VERSION: u32 = 1;

/// Top-level preferences document.
///
/// ```json
/// {
///   "version": 1,
///   "theme": "dark"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesRecord {
    /// Format version for future migrations.
    pub version: u32,

    /// Raw theme value, `None` until the user toggles the theme.
    #[serde(default)]
    pub theme: Option<String>,
}

impl Default for PreferencesRecord {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            theme: None,
        }
    }
}
