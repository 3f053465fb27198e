//! Default filesystem locations.
//!
//! Everything the engine writes lives under one data directory:
//! `$XDG_DATA_HOME/techblog`, else `~/.local/share/techblog`, else
//! `./.techblog` when no home directory is known.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "techblog";

/// Returns the data directory for preferences and traces.
///
/// The directory is not created here; writers create it on first use.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    match env::var_os("HOME").filter(|v| !v.is_empty()) {
        Some(home) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(format!(".{APP_DIR}")),
    }
}

/// Default location of the preferences document.
#[must_use]
pub fn preferences_path() -> PathBuf {
    data_dir().join("preferences.json")
}

/// Default location of the OTLP trace file.
#[must_use]
pub fn trace_path() -> PathBuf {
    data_dir().join("otlp.json")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or any path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use techblog::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) else {
        return PathBuf::from(path);
    };

    if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}
