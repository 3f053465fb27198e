//! Techblog: the content-and-navigation state engine of a technical blog.
//!
//! The engine loads Markdown articles with YAML front matter, derives a
//! filtered newest-first view of them, keeps the selected article in sync
//! with the address bar (including the `/?/post/<id>` form static hosts
//! produce for deep links) and raises auto-expiring notifications for every
//! outcome a reader should see.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (main.rs, a browser shell, tests)             │  ← address bar, timers
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, actions, runtime                 │
//! │  - View snapshot computation                        │
//! └─────────────────────────────────────────────────────┘
//!     │            │             │            │
//! ┌─────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────┐
//! │ store/  │ │ filter/  │ │ routing/  │ │ notify/      │
//! │ loads   │ │ tags,    │ │ selection │ │ alerts and   │
//! │         │ │ search   │ │ ↔ URL     │ │ toasts       │
//! └─────────┘ └──────────┘ └───────────┘ └──────────────┘
//!     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Worker (worker/) → content/ + storage/             │  ← blocking I/O
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use techblog::app::{AppState, Event, MemoryHost, Runtime};
//! use techblog::content::StaticSource;
//! use techblog::routing::Selection;
//! use techblog::storage::MemoryPreferenceStore;
//! use techblog::ui::ThemePreference;
//! use techblog::worker::ContentWorker;
//!
//! let source = StaticSource::default()
//!     .with("7", "---\ntitle: Seven\ndate: 2025-07-01\n---\nbody");
//! let worker = ContentWorker::new(Box::new(source), Box::new(MemoryPreferenceStore::default()));
//! let mut runtime = Runtime::new(
//!     AppState::new(ThemePreference::default()),
//!     worker,
//!     MemoryHost::at("/post/7"),
//! );
//!
//! runtime.dispatch(Event::Mount { href: "/post/7".into() }, 0);
//! runtime.run_worker(0);
//!
//! assert_eq!(runtime.state().router.selection(), Selection::Viewing(7));
//! ```

pub mod app;
pub mod content;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod notify;
pub mod observability;
pub mod routing;
pub mod storage;
pub mod store;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Host, MemoryHost, Runtime};
pub use domain::{Article, ArticleId, BlogError, Result};
pub use ui::{ThemeMode, ThemePreference};

use content::DirectorySource;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
use worker::ContentWorker;

/// Engine configuration.
///
/// Read from a TOML file, from key/value pairs, or built directly.
///
/// ```toml
/// content_dir = "~/blog/posts"
/// preferences_file = "~/.local/share/techblog/preferences.json"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of `<id>.md` article files. Default: `posts`
    pub content_dir: PathBuf,

    /// Theme preference document. Default: `<data dir>/preferences.json`
    pub preferences_file: Option<PathBuf>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// OTLP trace output. Default: `<data dir>/otlp.json`
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("posts"),
            preferences_file: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Builds a config from key/value pairs, such as environment variables
    /// with their prefix stripped.
    ///
    /// Unknown keys are ignored and empty values count as unset. Paths get a
    /// leading `~` expanded.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use techblog::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("content_dir".to_string(), "/srv/blog/posts".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.content_dir, std::path::PathBuf::from("/srv/blog/posts"));
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merged_with(map)
    }

    /// Overrides fields present in `map`, leaving the rest untouched.
    #[must_use]
    pub fn merged_with(mut self, map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        if let Some(dir) = get("content_dir") {
            self.content_dir = infrastructure::expand_tilde(dir);
        }
        if let Some(file) = get("preferences_file") {
            self.preferences_file = Some(infrastructure::expand_tilde(file));
        }
        if let Some(level) = get("trace_level") {
            self.trace_level = Some(level.to_string());
        }
        if let Some(file) = get("trace_file") {
            self.trace_file = Some(infrastructure::expand_tilde(file));
        }
        self
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Config`] if the document is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| BlogError::Config(format!("Invalid config: {e}")))?;
        Ok(config.with_expanded_paths())
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BlogError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Preferences document to use, falling back to the data directory.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_file
            .clone()
            .unwrap_or_else(infrastructure::preferences_path)
    }

    fn with_expanded_paths(mut self) -> Self {
        let expand = |p: &Path| infrastructure::expand_tilde(&p.to_string_lossy());
        self.content_dir = expand(&self.content_dir);
        self.preferences_file = self.preferences_file.as_deref().map(expand);
        self.trace_file = self.trace_file.as_deref().map(expand);
        self
    }
}

/// Builds a runtime over the configured content directory and preference
/// file.
///
/// The theme is resolved from the stored preference, falling back to
/// `system_prefers_dark`. If the preference file cannot be opened the
/// runtime keeps preferences in memory for this session.
///
/// Nothing is loaded yet; dispatch [`Event::Mount`] to start.
pub fn initialize<H: Host>(config: &Config, system_prefers_dark: bool, host: H) -> Runtime<H> {
    let _span = tracing::debug_span!("initialize", content_dir = ?config.content_dir).entered();

    let source = DirectorySource::new(config.content_dir.clone());
    let preferences: Box<dyn PreferenceStore> =
        match JsonPreferenceStore::new(config.preferences_path()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "preferences unavailable, keeping them in memory");
                Box::new(MemoryPreferenceStore::default())
            }
        };

    let worker = ContentWorker::new(Box::new(source), preferences);
    let theme = ThemePreference::resolve(worker.stored_theme().as_deref(), system_prefers_dark);
    tracing::debug!(theme = %theme.mode(), explicit = theme.is_explicit(), "theme resolved");

    Runtime::new(AppState::new(theme), worker, host)
}
