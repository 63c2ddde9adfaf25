//! # Error Types

use std::path::PathBuf;

/// Errors from wordcontext operations.
#[derive(Debug, thiserror::Error)]
pub enum WordContextError {
    /// I/O error; e.g. an unreadable corpus.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A cache (or weights) file exists but could not be decoded.
    ///
    /// There is no automatic rebuild; the caller must force one.
    #[error("failed to deserialize {}: {message}", path.display())]
    Deserialization {
        /// The file that failed to decode.
        path: PathBuf,

        /// The decoder message.
        message: String,
    },

    /// Encoding a cache (or weights) file failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A pipeline option is unusable; e.g. a zero batch size.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Error from an external component.
    #[error("{0}")]
    External(String),
}

impl From<anyhow::Error> for WordContextError {
    fn from(err: anyhow::Error) -> Self {
        WordContextError::External(format!("{err:#}"))
    }
}

/// Result type for wordcontext operations.
pub type WCResult<T> = core::result::Result<T, WordContextError>;
