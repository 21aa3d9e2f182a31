//! Error types for the aggregation and annotation core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the model, merger, annotator and renderer.
#[derive(Debug, Error)]
pub enum Error {
    /// An issue or file operation received data for a different path.
    /// This points at an aggregation bug upstream.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A report document is not well-formed.
    #[error("malformed report {path}: {reason}")]
    MalformedInput { path: String, reason: String },

    /// A source file referenced by the registry cannot be loaded.
    #[error("cannot read source file {path}: {source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid query {expr:?}: {reason}")]
    InvalidQuery { expr: String, reason: String },

    #[error("template error: {0}")]
    Template(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(e: handlebars::RenderError) -> Self {
        Error::Template(e.to_string())
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(e: handlebars::TemplateError) -> Self {
        Error::Template(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
