//! Light/dark theme selection.
//!
//! The active mode comes from the persisted preference when one exists, and
//! from the environment's dark-mode signal otherwise. Toggling always produces
//! an explicit preference that the caller persists.
//!
//! # Example
//!
//! ```rust
//! use techblog::ui::theme::{ThemeMode, ThemePreference};
//!
//! let mut theme = ThemePreference::resolve(None, true);
//! assert_eq!(theme.mode(), ThemeMode::Dark);
//!
//! let saved = theme.toggle();
//! assert_eq!(saved, ThemeMode::Light);
//! assert!(theme.is_explicit());
//! ```

use crate::domain::error::{BlogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme of the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Persisted representation: `"light"` or `"dark"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(BlogError::Theme(format!("unknown theme mode: {other:?}"))),
        }
    }
}

/// Effective theme plus whether it was chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    mode: ThemeMode,
    explicit: bool,
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::resolve(None, false)
    }
}

impl ThemePreference {
    /// Resolves the startup theme.
    ///
    /// # Parameters
    ///
    /// * `stored` - Raw persisted value, if any
    /// * `system_prefers_dark` - The environment's dark-mode signal
    ///
    /// An unrecognized stored value is logged and treated as unset.
    #[must_use]
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        let parsed = stored.and_then(|raw| match raw.parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored theme");
                None
            }
        });

        match parsed {
            Some(mode) => Self { mode, explicit: true },
            None => Self {
                mode: ThemeMode::from_system(system_prefers_dark),
                explicit: false,
            },
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// `false` while the mode still follows the environment.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Flips the mode and returns the value to persist.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.explicit = true;
        tracing::debug!(mode = %self.mode, "theme toggled");
        self.mode
    }
}
