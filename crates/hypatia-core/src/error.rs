//! Error taxonomy for building and running specs.

use thiserror::Error;

use crate::codec::CodecError;

/// Result type alias using [`SpecError`].
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors surfaced while building or running a spec.
///
/// Configuration errors ([`Codec`](Self::Codec), [`InvalidHeader`](Self::InvalidHeader),
/// [`InvalidPath`](Self::InvalidPath)) poison the spec: they surface from the
/// terminal operation before anything is dispatched, and no request is ever
/// sent. [`App`](Self::App) means the embedded application itself failed and
/// propagates out of the run unrecovered.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Encoding a request body or decoding a response body failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A header name or value was empty or malformed.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why the header was rejected.
        reason: String,
    },

    /// The configured path does not form a valid request URI.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path, after normalization.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The embedded application failed to produce a response.
    #[error("application error: {message}")]
    App {
        /// Human-readable description of the application failure.
        message: String,
    },
}

impl SpecError {
    /// Creates an invalid-header error.
    #[must_use]
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an application error.
    #[must_use]
    pub fn app(message: impl Into<String>) -> Self {
        Self::App {
            message: message.into(),
        }
    }
}
