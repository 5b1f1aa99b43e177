//! # jot-search
//!
//! Free-text search over the journal.
//!
//! Case-insensitive substring matching over task titles, entry content, and
//! one-on-one meeting notes. There is no index: every search loads the full
//! record set from the store and scans it in memory.

pub mod engine;
pub mod error;
pub mod snippet;

use jot_core::requests::SearchRequest;
use jot_core::responses::SearchResults;
use jot_store::service::JournalService;

use error::SearchError;

/// Run a search against everything in the store.
///
/// Unreadable task or meeting files are skipped and reported in
/// `skipped_records`.
///
/// # Errors
///
/// Returns [`SearchError`] if the store cannot be listed or the query is blank.
pub async fn search_entries(
    service: &JournalService,
    req: &SearchRequest,
) -> Result<SearchResults, SearchError> {
    let tasks = service.load_tasks().await?;
    let meetings = service.load_one_on_ones().await?;

    let hits = engine::search(&tasks.records, &meetings.records, req)?;
    tracing::debug!(query = %req.query, hits = hits.len(), "search complete");

    let mut skipped_records = tasks.skipped;
    skipped_records.extend(meetings.skipped);
    Ok(SearchResults {
        query: req.query.clone(),
        total: hits.len(),
        hits,
        skipped_records,
    })
}
