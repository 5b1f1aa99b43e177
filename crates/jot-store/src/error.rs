//! Store error types for jot-store.
//!
//! File paths in messages are always relative to the data root.

use jot_core::errors::CoreError;
use thiserror::Error;

/// Errors from store and service operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Argument validation or lookup failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a record file failed.
    #[error("I/O error on {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A record file could not be encoded or decoded.
    #[error("Invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Whether this error reports a missing task or entry.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(core) if core.is_not_found())
    }
}
