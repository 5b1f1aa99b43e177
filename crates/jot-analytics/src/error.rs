use jot_store::error::StoreError;
use thiserror::Error;

/// Errors from analytics and recommendation requests.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
