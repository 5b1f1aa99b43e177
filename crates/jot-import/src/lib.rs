//! # jot-import
//!
//! Bulk import into the journal and export out of it.
//!
//! Import parses a payload with the adapter for its format (plain text,
//! markdown, JSON, CSV), then merges every parsed task into the store.
//! Merging is idempotent at the entry level: an entry whose timestamp and
//! content already exist on the stored task is counted as a duplicate.
//!
//! Export renders the stored tasks and meetings as JSON, markdown, or CSV.
//! The JSON and CSV outputs import back cleanly.

pub mod adapters;
pub mod error;
pub mod export;
pub mod timestamp;

use chrono::{DateTime, Utc};
use jot_core::requests::{ExportRequest, ImportRequest};
use jot_core::responses::{ExportOutput, ImportResult};
use jot_store::service::JournalService;

use adapters::{ImportContext, adapter_for};
use error::ImportError;

/// Import `req.content` into the journal.
///
/// # Errors
///
/// Returns [`ImportError`] if the payload as a whole cannot be parsed or a
/// task cannot be written. Per-record problems land in `warnings`.
pub async fn import_data(
    service: &JournalService,
    req: &ImportRequest,
) -> Result<ImportResult, ImportError> {
    import_data_at(service, req, Utc::now()).await
}

/// [`import_data`] with an explicit clock for undated entries.
///
/// # Errors
///
/// See [`import_data`].
pub async fn import_data_at(
    service: &JournalService,
    req: &ImportRequest,
    now: DateTime<Utc>,
) -> Result<ImportResult, ImportError> {
    let ctx = ImportContext {
        prefix: req.task_prefix.clone(),
        default_type: req.default_type,
        now,
    };
    let batch = adapter_for(req.format).parse(&req.content, &ctx)?;
    tracing::debug!(
        format = %req.format,
        tasks = batch.tasks.len(),
        entries = batch.entry_count(),
        "parsed import payload"
    );

    let mut result = ImportResult {
        warnings: batch.warnings,
        ..ImportResult::default()
    };
    for task in batch.tasks {
        let outcome = service.merge_task(task).await?;
        if outcome.created {
            result.tasks_created += 1;
        }
        result.entries_added += outcome.entries_added;
        result.duplicates_skipped += outcome.duplicates_skipped;
    }

    result.summary = format!(
        "Imported {} task(s) and {} entr{} from {} ({} duplicate(s) skipped, {} warning(s))",
        result.tasks_created,
        result.entries_added,
        if result.entries_added == 1 { "y" } else { "ies" },
        req.format,
        result.duplicates_skipped,
        result.warnings.len()
    );
    tracing::info!(
        tasks_created = result.tasks_created,
        entries_added = result.entries_added,
        duplicates_skipped = result.duplicates_skipped,
        warnings = result.warnings.len(),
        "import complete"
    );
    Ok(result)
}

/// Export the journal in the requested format.
///
/// Unreadable task or meeting files are skipped, as everywhere else.
///
/// # Errors
///
/// Returns [`ImportError`] if the store cannot be listed or encoding fails.
pub async fn export_data(
    service: &JournalService,
    req: &ExportRequest,
) -> Result<ExportOutput, ImportError> {
    let now = Utc::now();
    let tasks = export::select_tasks(service.load_tasks().await?.records, &req.range, req.task_type);
    let meetings = export::select_meetings(service.load_one_on_ones().await?.records, &req.range);
    let content = export::render(req.format, &tasks, &meetings, now)?;

    tracing::debug!(format = %req.format, tasks = tasks.len(), "export rendered");
    Ok(ExportOutput {
        format: req.format,
        tasks: tasks.len(),
        entries: tasks.iter().map(|t| t.entries.len()).sum(),
        one_on_ones: meetings.len(),
        exported_at: now,
        content,
    })
}
