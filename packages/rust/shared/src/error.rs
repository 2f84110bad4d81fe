//! Error types for gqldoc.
//!
//! Library crates use [`GqlDocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all gqldoc operations.
#[derive(Debug, thiserror::Error)]
pub enum GqlDocError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Schema source could not be loaded or parsed.
    #[error("unable to parse schema: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A description could not be converted from markup.
    #[error("markup conversion error: {0}")]
    Markup(String),

    /// A table or metadata fragment could not be minified.
    #[error("minify error: {0}")]
    Minify(String),

    /// A required cross-reference names something that was never registered.
    #[error("no anchor registered for {namespace} `{name}`")]
    AnchorNotFound { namespace: String, name: String },

    /// The destination refused a write.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GqlDocError>;

impl GqlDocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a markup conversion error.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Create a minifier error.
    pub fn minify(msg: impl Into<String>) -> Self {
        Self::Minify(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
