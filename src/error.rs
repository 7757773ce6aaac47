//! Application-wide error types.
//!
//! Library modules return [`Error`] through the [`Result`] alias, while the
//! CLI layer uses `anyhow` for convenient propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - [`ProviderError`](crate::providers::ProviderError): failures of external
//!   metadata/lyrics sources, converted into [`Error::Provider`]
//! - Expected per-track absences (no matching file, no lyrics) are never
//!   errors; they are recorded in the edit report instead.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag reading/writing error
    #[error("Metadata error for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Album directory or image directory failed validation
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A track that can never be valid (zero ordinal, zero disc)
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// A provider name that is not registered
    #[error("Unknown {kind} '{name}'")]
    UnknownProvider { kind: &'static str, name: String },

    /// Metadata or lyrics provider failure
    #[error("Provider error: {0}")]
    Provider(#[from] crate::providers::ProviderError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }

    /// Create an invalid track error.
    pub fn invalid_track(message: impl Into<String>) -> Self {
        Self::InvalidTrack(message.into())
    }

    /// Create an unknown provider error.
    pub fn unknown_provider(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownProvider {
            kind,
            name: name.into(),
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
