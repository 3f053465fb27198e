//! Address bar parsing and interpretation.
//!
//! The address bar understands three shapes besides the plain list at `/`:
//!
//! | Input                    | Meaning                                        |
//! |--------------------------|------------------------------------------------|
//! | `/post/<id>`             | canonical article path                         |
//! | `/?/post/<id>[&...]`     | static-host redirect of an unmatched deep path |
//! | `/?notFound=<encoded>`   | the host could not serve `<encoded>`           |

use crate::domain::ArticleId;
use percent_encoding::percent_decode_str;
use std::fmt;

/// Prefix of every article path.
pub const ARTICLE_PREFIX: &str = "/post/";

/// Query parameter a static host uses to report an unmatched path.
pub const NOT_FOUND_PARAM: &str = "notFound";

/// Path and query of the address bar; the fragment is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    query: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl Location {
    #[must_use]
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: String::new(),
        }
    }

    /// Parses an href such as `/post/3`, `/?/post/3` or
    /// `https://example.com/post/3#top`.
    ///
    /// Never fails: an empty or relative path is read as `/`.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let href = href.split_once('#').map_or(href, |(before, _)| before);
        let href = match href.split_once("://") {
            Some((_, rest)) => rest.find('/').map_or("/", |slash| &rest[slash..]),
            None => href,
        };

        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self {
            path,
            query: query.to_string(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string without the leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    #[must_use]
    pub fn to_href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Value of query parameter `name`, percent-decoded, `+` read as space.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| decode_component(value))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_href())
    }
}

/// Canonical address of an article.
#[must_use]
pub fn article_path(id: ArticleId) -> String {
    format!("{ARTICLE_PREFIX}{id}")
}

/// What an address bar location asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    /// An article token, not yet validated.
    Article { token: String },
    /// Legacy redirect form; the address bar must be rewritten to
    /// [`Route::Article`]'s canonical path.
    LegacyArticle { token: String },
    /// The host reported `path` as unservable.
    NotFound { path: String },
}

impl Route {
    /// Interprets `location`, checking `notFound` first, then the article
    /// path, then the legacy query.
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        if location.is_root() {
            if let Some(path) = location.query_param(NOT_FOUND_PARAM) {
                return Self::NotFound { path };
            }
        }

        if let Some(token) = article_token(location.path()) {
            return Self::Article { token };
        }

        if location.is_root() {
            let legacy = location.query().split('&').next().unwrap_or_default();
            if let Some(token) = article_token(legacy) {
                return Self::LegacyArticle { token };
            }
        }

        Self::List
    }
}

fn article_token(path: &str) -> Option<String> {
    let token = path.strip_prefix(ARTICLE_PREFIX)?.trim_end_matches('/');
    if token.is_empty() || token.contains('/') {
        return None;
    }
    Some(decode_component(token))
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
