//! Domain layer for the blog engine.
//!
//! This module contains the core domain types, independent of the content
//! source, the host environment, and presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`article`]: Article entity

pub mod article;
pub mod error;

pub use article::{Article, ArticleId};
pub use error::{BlogError, Result};
