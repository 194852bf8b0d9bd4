//! Error types for Surge.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Surge.
#[derive(Debug, Error)]
pub enum Error {
    /// A channel record failed domain validation.
    #[error("invalid channel record {id}: {reason}")]
    InvalidRecord {
        /// Identifier of the offending record.
        id: String,
        /// The violated invariant.
        reason: String,
    },

    /// The same channel id appeared more than once in a single batch.
    #[error("duplicate channel id in batch: {0}")]
    DuplicateChannel(String),

    /// Channel source error.
    #[error("source error: {0}")]
    Source(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
