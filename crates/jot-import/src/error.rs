//! Import and export error types for jot-import.

use jot_core::errors::CoreError;
use jot_store::error::StoreError;
use thiserror::Error;

/// Errors that abort an import or export.
///
/// Per-record problems are not errors: they become warnings on the
/// `ImportResult` and the record is skipped.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Argument validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The top-level JSON payload could not be parsed.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// A CSV header lacks a mandatory column.
    #[error("CSV header must include a {role} column (one of: {accepted})")]
    MissingColumn { role: String, accepted: String },

    /// Encoding export output failed.
    #[error("Failed to encode export: {0}")]
    Export(#[source] serde_json::Error),
}
