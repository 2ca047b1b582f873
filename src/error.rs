//! Error types for cadence.
//!
//! Catalog failures surface as `Http`/`Api`/`Decode`; the library store
//! degrades those to empty results. `QueueIndex` is reserved for
//! programmer-error indices into the playback queue.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or non-success HTTP status from the catalog.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered, but its response header reported a failure.
    #[error("catalog error {code}: {message}")]
    Api { code: i64, message: String },

    /// The catalog body could not be decoded.
    #[error("catalog response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// Index outside the bounds of the playback queue.
    #[error("queue index {index} out of range for queue of length {len}")]
    QueueIndex { index: usize, len: usize },

    /// Configuration sources could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
