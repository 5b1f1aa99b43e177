//! Search error types for jot-search.

/// Errors from search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Error loading records from the store.
    #[error("store error: {0}")]
    Store(#[from] jot_store::error::StoreError),

    /// Invalid or empty search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
