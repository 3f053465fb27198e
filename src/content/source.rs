//! Content source abstraction.
//!
//! A [`ContentSource`] hands the loader a list of raw documents, each paired
//! with a source token (the file stem for on-disk content). The loader never
//! touches the filesystem itself, which keeps parsing testable and lets a host
//! bundle content at build time or fetch it from anywhere else.

use crate::domain::error::{BlogError, Result};
use std::path::{Path, PathBuf};

/// A raw article document as read from a content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Filename-equivalent token, used to derive an id when metadata has none.
    pub token: String,
    /// Full document text including the front matter block.
    pub text: String,
}

impl SourceDocument {
    pub fn new(token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            text: text.into(),
        }
    }
}

/// Abstraction over places articles can be read from.
///
/// Implementations return documents in a deterministic source order. That
/// order is the tie-breaker when two articles share a publication date.
///
/// # Implementations
///
/// - [`DirectorySource`]: every `*.md` file in a directory
/// - [`StaticSource`]: an in-memory bundle
pub trait ContentSource: Send {
    /// Reads every document from the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source as a whole cannot be read. Individual
    /// documents are never rejected here; malformed content is the loader's
    /// concern.
    fn documents(&self) -> Result<Vec<SourceDocument>>;
}

/// Reads `*.md` files from a single directory.
///
/// Files are returned sorted by file name. Subdirectories and files with other
/// extensions are ignored. A file that cannot be read as UTF-8 fails the whole
/// load, matching the all-or-nothing contract of the collection store.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirectorySource {
    fn documents(&self) -> Result<Vec<SourceDocument>> {
        let _span = tracing::debug_span!("directory_source_documents", root = ?self.root).entered();

        if !self.root.is_dir() {
            return Err(BlogError::Content(format!(
                "content directory not found: {}",
                self.root.display()
            )));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.root)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("md")
            })
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let token = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string();
            let text = std::fs::read_to_string(&path).map_err(|e| {
                BlogError::Content(format!("failed to read {}: {e}", path.display()))
            })?;
            tracing::trace!(token = %token, bytes = text.len(), "read content file");
            documents.push(SourceDocument { token, text });
        }

        tracing::debug!(count = documents.len(), "content directory read");
        Ok(documents)
    }
}

/// In-memory bundle of documents, for content compiled into the binary.
///
/// # Examples
///
/// ```
/// use techblog::content::{ContentSource, StaticSource};
///
/// let source = StaticSource::default()
///     .with("post1", "---\ntitle: Hello\n---\nBody");
/// assert_eq!(source.documents().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<SourceDocument>,
}

impl StaticSource {
    #[must_use]
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self { documents }
    }

    /// Appends a document, builder style.
    #[must_use]
    pub fn with(mut self, token: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(SourceDocument::new(token, text));
        self
    }
}

impl ContentSource for StaticSource {
    fn documents(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.documents.clone())
    }
}
