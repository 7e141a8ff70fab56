//! Error types for loading and rendering posts

use std::path::PathBuf;
use thiserror::Error;

/// Raised while building a post collection. Fatal for the whole listing.
#[derive(Error, Debug)]
pub enum ContentLoadError {
    #[error("{source_key}: missing required field `{field}`")]
    MissingField {
        source_key: String,
        field: &'static str,
    },

    #[error("{source_key}: invalid date {value:?}")]
    InvalidDate { source_key: String, value: String },

    #[error("{source_key}: invalid front-matter: {message}")]
    InvalidFrontMatter { source_key: String, message: String },

    #[error("duplicate identifier `{identifier}` ({first} and {second})")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("failed to read {path:?}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

/// Raised for a single post while composing pages. Never fatal for the page.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("body reference `{0}` cannot be resolved")]
    UnresolvedBody(String),

    #[error("failed to read body of `{key}`: {error}")]
    Io {
        key: String,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to render `{key}`: {message}")]
    Markdown { key: String, message: String },
}
