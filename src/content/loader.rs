//! Article parsing and collection loading.
//!
//! Raw documents are Markdown files that may start with a YAML front matter
//! block:
//!
//! ```text
//! ---
//! id: 2
//! title: Optimizing React Performance
//! date: 2025-04-05
//! description: How I improved our application's performance.
//! tags: [React, Performance]
//! ---
//! # Optimizing React Performance
//! ...
//! ```
//!
//! Parsing fails closed: a malformed block is treated as "no metadata" and
//! every missing field gets its default, so a single bad file never aborts a
//! load.

use super::source::{ContentSource, SourceDocument};
use crate::domain::error::Result;
use crate::domain::{Article, ArticleId};
use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// Reading speed used to estimate read time.
pub const WORDS_PER_MINUTE: usize = 200;

/// Title used when the metadata does not provide one.
pub const UNTITLED_TITLE: &str = "Untitled Post";

const FENCE: &str = "---";

/// Date formats accepted in the `date` field, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Metadata fields recognized in the front matter block.
#[derive(Debug, Default)]
struct Metadata {
    id: Option<ArticleId>,
    title: Option<String>,
    date: Option<NaiveDate>,
    description: Option<String>,
    read_time: Option<String>,
    tags: Option<Vec<String>>,
    coming_soon: Option<bool>,
}

/// Parses a raw document into an [`Article`], defaulting the date to today.
///
/// See [`parse_article_on`] for the parsing rules.
#[must_use]
pub fn parse_article(raw: &str, source_token: &str) -> Article {
    parse_article_on(raw, source_token, chrono::Local::now().date_naive())
}

/// Parses a raw document into an [`Article`].
///
/// # Parameters
///
/// * `raw` - Full document text
/// * `source_token` - Filename-equivalent token, used for the id fallback
/// * `today` - Date substituted when the metadata has no usable `date`
///
/// # Defaults
///
/// - `id`: digits embedded in `source_token`, else `0`
/// - `title`: `"Untitled Post"`
/// - `description`: empty
/// - `read_time`: estimated from the body at 200 words per minute
/// - `tags`: empty
/// - `coming_soon`: `false`
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use techblog::content::parse_article_on;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let article = parse_article_on("---\ntitle: Hi\n---\nBody text", "post7", today);
/// assert_eq!(article.id, 7);
/// assert_eq!(article.title, "Hi");
/// assert_eq!(article.read_time, "1 min read");
/// ```
#[must_use]
pub fn parse_article_on(raw: &str, source_token: &str, today: NaiveDate) -> Article {
    let (block, body) = split_front_matter(raw);
    let meta = block.map(parse_metadata).unwrap_or_default();

    let id = meta.id.unwrap_or_else(|| id_from_token(source_token));
    let read_time = meta
        .read_time
        .unwrap_or_else(|| calculate_read_time(body));

    Article {
        id,
        title: meta.title.unwrap_or_else(|| UNTITLED_TITLE.to_string()),
        description: meta.description.unwrap_or_default(),
        content: body.to_string(),
        date: meta.date.unwrap_or(today),
        read_time,
        tags: meta.tags.unwrap_or_default(),
        coming_soon: meta.coming_soon.unwrap_or(false),
    }
}

/// Estimates the read time of a Markdown body.
///
/// Counts whitespace-separated words, divides by [`WORDS_PER_MINUTE`] and
/// rounds up. Short or empty bodies still read as one minute.
///
/// # Examples
///
/// ```
/// use techblog::content::calculate_read_time;
///
/// assert_eq!(calculate_read_time("word ".repeat(201).as_str()), "2 min read");
/// ```
#[must_use]
pub fn calculate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// Derives an article id from the digits embedded in a source token.
///
/// All digits are concatenated (`"post-1-v2"` yields `12`). Tokens without
/// digits, or whose digits overflow, yield `0`.
#[must_use]
pub fn id_from_token(token: &str) -> ArticleId {
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Parses a metadata date value in any of the accepted formats.
///
/// RFC 3339 timestamps are accepted and truncated to their calendar date.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Loads, parses and orders every article from a content source.
///
/// Articles are sorted newest first; equal dates keep source order. When two
/// documents resolve to the same id, the first one in source order wins and
/// the other is dropped.
///
/// # Errors
///
/// Returns an error only if the source itself cannot be read.
pub fn load_all_articles(source: &dyn ContentSource) -> Result<Vec<Article>> {
    let _span = tracing::debug_span!("load_all_articles").entered();

    let today = chrono::Local::now().date_naive();
    let documents = source.documents()?;
    Ok(build_collection(&documents, today))
}

/// Parses documents into a de-duplicated, newest-first collection.
pub(crate) fn build_collection(documents: &[SourceDocument], today: NaiveDate) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut articles: Vec<Article> = documents
        .iter()
        .map(|doc| parse_article_on(&doc.text, &doc.token, today))
        .filter(|article| {
            let fresh = seen.insert(article.id);
            if !fresh {
                tracing::warn!(id = article.id, title = %article.title, "duplicate article id, dropping");
            }
            fresh
        })
        .collect();

    sort_newest_first(&mut articles);

    tracing::debug!(count = articles.len(), "articles loaded");
    articles
}

/// Stable sort by date, newest first.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Splits a document into its front matter block and body.
///
/// The opening fence must be the first line. Without a closing fence the
/// whole document is body.
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(after_fence) = text.strip_prefix(FENCE) else {
        return (None, text);
    };
    let Some(rest) = after_fence
        .strip_prefix("\r\n")
        .or_else(|| after_fence.strip_prefix('\n'))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(block), body);
        }
        offset += line.len();
    }

    (None, text)
}

fn parse_metadata(block: &str) -> Metadata {
    let value: Value = match serde_yaml::from_str(block) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "malformed front matter, using defaults");
            return Metadata::default();
        }
    };

    let Some(map) = value.as_mapping() else {
        tracing::debug!("front matter is not a mapping, using defaults");
        return Metadata::default();
    };

    Metadata {
        id: field(map, "id").and_then(id_value),
        title: field(map, "title").and_then(non_empty_string),
        date: field(map, "date")
            .and_then(Value::as_str)
            .and_then(parse_date),
        description: field(map, "description")
            .and_then(Value::as_str)
            .map(String::from),
        read_time: field(map, "readTime").and_then(non_empty_string),
        tags: field(map, "tags").and_then(tag_list),
        coming_soon: field(map, "comingSoon").and_then(Value::as_bool),
    }
}

fn field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key)
}

/// A zero id counts as missing so the token fallback applies.
fn id_value(value: &Value) -> Option<ArticleId> {
    let id = match value {
        Value::Number(n) => n.as_u64().and_then(|n| ArticleId::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|id| *id != 0)
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn tag_list(value: &Value) -> Option<Vec<String>> {
    let raw: Vec<&str> = match value {
        Value::Sequence(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(s) => vec![s.as_str()],
        _ => return None,
    };

    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw.into_iter().map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Some(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_full_front_matter() {
        let raw = "---\n\
            id: 2\n\
            title: Optimizing React Performance\n\
            date: April 5, 2025\n\
            description: How I improved performance.\n\
            readTime: 6 min read\n\
            tags: [React, Performance, Frontend]\n\
            comingSoon: true\n\
            ---\n\
            # Heading\n\nBody";

        let article = parse_article_on(raw, "whatever", today());

        assert_eq!(article.id, 2);
        assert_eq!(article.title, "Optimizing React Performance");
        assert_eq!(article.date, date(2025, 4, 5));
        assert_eq!(article.description, "How I improved performance.");
        assert_eq!(article.read_time, "6 min read");
        assert_eq!(article.tags, vec!["React", "Performance", "Frontend"]);
        assert!(article.coming_soon);
        assert_eq!(article.content, "# Heading\n\nBody");
    }

    #[test]
    fn missing_metadata_uses_defaults() {
        let article = parse_article_on("just a body", "post-42", today());

        assert_eq!(article.id, 42);
        assert_eq!(article.title, UNTITLED_TITLE);
        assert_eq!(article.description, "");
        assert_eq!(article.date, today());
        assert_eq!(article.read_time, "1 min read");
        assert!(article.tags.is_empty());
        assert!(!article.coming_soon);
        assert_eq!(article.content, "just a body");
    }

    #[test]
    fn malformed_yaml_is_treated_as_no_metadata() {
        let raw = "---\ntitle: [unclosed\nid: : :\n---\nBody survives";

        let article = parse_article_on(raw, "post3", today());

        assert_eq!(article.id, 3);
        assert_eq!(article.title, UNTITLED_TITLE);
        assert_eq!(article.content, "Body survives");
    }

    #[test]
    fn unclosed_fence_keeps_whole_text_as_body() {
        let raw = "---\ntitle: Never closed\nBody";

        let article = parse_article_on(raw, "x", today());

        assert_eq!(article.title, UNTITLED_TITLE);
        assert_eq!(article.content, raw);
        assert_eq!(article.id, 0);
    }

    #[test]
    fn wrongly_typed_fields_fall_back_individually() {
        let raw = "---\ntitle: Typed\ntags: 12\ncomingSoon: maybe\ndate: not a date\n---\n";

        let article = parse_article_on(raw, "post9", today());

        assert_eq!(article.title, "Typed");
        assert!(article.tags.is_empty());
        assert!(!article.coming_soon);
        assert_eq!(article.date, today());
    }

    #[test]
    fn zero_id_in_metadata_falls_back_to_token() {
        let article = parse_article_on("---\nid: 0\n---\n", "post5", today());
        assert_eq!(article.id, 5);
    }

    #[test]
    fn string_id_and_duplicate_tags() {
        let raw = "---\nid: \"17\"\ntags: [Rust, Rust, \" Learning \"]\n---\n";

        let article = parse_article_on(raw, "x", today());

        assert_eq!(article.id, 17);
        assert_eq!(article.tags, vec!["Rust", "Learning"]);
    }

    #[test]
    fn crlf_documents_are_split() {
        let raw = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";

        let article = parse_article_on(raw, "x", today());

        assert_eq!(article.title, "Windows");
        assert_eq!(article.content, "Body\r\n");
    }

    #[test]
    fn read_time_rounds_up() {
        assert_eq!(calculate_read_time(""), "1 min read");
        assert_eq!(calculate_read_time(&"w ".repeat(200)), "1 min read");
        assert_eq!(calculate_read_time(&"w ".repeat(401)), "3 min read");
    }

    #[test]
    fn id_from_token_concatenates_digits() {
        assert_eq!(id_from_token("post-1-v2"), 12);
        assert_eq!(id_from_token("about"), 0);
        assert_eq!(id_from_token("99999999999999999999"), 0);
    }

    #[test]
    fn accepts_several_date_formats() {
        assert_eq!(parse_date("2025-04-12"), Some(date(2025, 4, 12)));
        assert_eq!(parse_date("2025/04/12"), Some(date(2025, 4, 12)));
        assert_eq!(parse_date("April 12, 2025"), Some(date(2025, 4, 12)));
        assert_eq!(parse_date("Apr 12, 2025"), Some(date(2025, 4, 12)));
        assert_eq!(parse_date("2025-04-12T23:30:00+02:00"), Some(date(2025, 4, 12)));
        assert_eq!(parse_date("someday"), None);
    }

    #[test]
    fn collection_is_newest_first_and_stable() {
        let docs = vec![
            SourceDocument::new("post1", "---\ndate: 2025-03-01\ntitle: A\n---\n"),
            SourceDocument::new("post2", "---\ndate: 2025-04-01\ntitle: B\n---\n"),
            SourceDocument::new("post3", "---\ndate: 2025-03-01\ntitle: C\n---\n"),
        ];

        let articles = build_collection(&docs, today());

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn duplicate_ids_keep_first_in_source_order() {
        let docs = vec![
            SourceDocument::new("a", "---\nid: 4\ntitle: First\n---\n"),
            SourceDocument::new("b", "---\nid: 4\ntitle: Second\n---\n"),
        ];

        let articles = build_collection(&docs, today());

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "First");
    }
}
