//! Content loading: from raw Markdown documents to canonical articles.
//!
//! # Modules
//!
//! - [`source`]: Where raw documents come from (directory, in-memory bundle)
//! - [`loader`]: Front matter parsing, defaults, and collection ordering

pub mod loader;
pub mod source;

pub use loader::{
    calculate_read_time, id_from_token, load_all_articles, parse_article, parse_article_on,
    parse_date, sort_newest_first, UNTITLED_TITLE, WORDS_PER_MINUTE,
};
pub use source::{ContentSource, DirectorySource, SourceDocument, StaticSource};
