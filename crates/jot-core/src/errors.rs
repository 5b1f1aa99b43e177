//! Cross-cutting error types for Jot.
//!
//! This module defines the validation and lookup errors that every operation
//! can raise at its argument boundary. Storage, search, import, and analytics
//! errors live in their respective crates and wrap `CoreError`. The CLI
//! converges all of them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Jot crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A required argument was absent or blank.
    #[error("{0} is required")]
    MissingArgument(String),

    /// An argument was not one of the accepted values.
    #[error("{field} must be one of: {expected} (got '{value}')")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// A primary date operand was not in `YYYY-MM-DD` form.
    #[error("Invalid {field} format. Expected YYYY-MM-DD (e.g., 2025-01-15), got: {value}")]
    InvalidDate { field: String, value: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing task.
    #[must_use]
    pub fn task_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "task".to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this error is a lookup miss rather than a rejected argument.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
