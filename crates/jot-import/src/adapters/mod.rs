//! Format adapters that turn raw import content into tasks.
//!
//! Each adapter is a pure parser: it never touches the store. The batch it
//! returns is merged into the journal by [`crate::import_data`].

mod csv;
mod json;
mod markdown;
mod txt;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use jot_core::entities::{Entry, Task, entry_kind};
use jot_core::enums::{ImportFormat, TaskType};
use jot_core::ids::sanitize_segment;

use crate::error::ImportError;

pub use self::csv::CsvAdapter;
pub use self::json::JsonAdapter;
pub use self::markdown::MarkdownAdapter;
pub use self::txt::TxtAdapter;

/// Settings shared by every adapter for one import call.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// Prepended to every generated task ID.
    pub prefix: String,
    pub default_type: TaskType,
    /// Timestamp for entries without a recognizable date.
    pub now: DateTime<Utc>,
}

/// Tasks parsed from one payload, plus per-record warnings.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub tasks: Vec<Task>,
    pub warnings: Vec<String>,
}

impl ParsedBatch {
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.tasks.iter().map(|t| t.entries.len()).sum()
    }
}

/// A parser for one import format.
pub trait ImportAdapter: Sync {
    /// Parse `content` into tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] only when the payload as a whole is unusable
    /// (unparseable JSON, a CSV without a content column). Bad records are
    /// reported as warnings on the batch.
    fn parse(&self, content: &str, ctx: &ImportContext) -> Result<ParsedBatch, ImportError>;
}

/// The adapter for `format`.
#[must_use]
pub fn adapter_for(format: ImportFormat) -> &'static dyn ImportAdapter {
    match format {
        ImportFormat::Txt => &TxtAdapter,
        ImportFormat::Markdown => &MarkdownAdapter,
        ImportFormat::Json => &JsonAdapter,
        ImportFormat::Csv => &CsvAdapter,
    }
}

/// Accumulates tasks for title-grouped formats.
///
/// Tasks are keyed by title so repeated headers or rows land in the same
/// task. Generated IDs are unique within the batch.
struct BatchBuilder<'a> {
    ctx: &'a ImportContext,
    tasks: Vec<Task>,
    by_title: HashMap<String, usize>,
    ids: HashSet<String>,
}

impl<'a> BatchBuilder<'a> {
    fn new(ctx: &'a ImportContext) -> Self {
        Self {
            ctx,
            tasks: Vec::new(),
            by_title: HashMap::new(),
            ids: HashSet::new(),
        }
    }

    /// `<prefix>-<segment>`, suffixed with `-2`, `-3`, ... on collision.
    fn unique_id(&mut self, segment: &str) -> String {
        let base = format!("{}-{segment}", self.ctx.prefix);
        let mut id = base.clone();
        let mut n = 2;
        while self.ids.contains(&id) {
            id = format!("{base}-{n}");
            n += 1;
        }
        self.ids.insert(id.clone());
        id
    }

    /// Index of the task titled `title`, creating it with an ID derived
    /// from `segment` (or the title when `segment` is `None`).
    fn task_index(&mut self, title: &str, segment: Option<&str>) -> usize {
        if let Some(&idx) = self.by_title.get(title) {
            return idx;
        }
        let derived = sanitize_segment(segment.unwrap_or(title));
        let segment = if derived.is_empty() { "untitled".to_string() } else { derived };
        let id = self.unique_id(&segment);
        let task = Task::without_entries(&id, title, self.ctx.default_type, self.ctx.now);
        self.tasks.push(task);
        let idx = self.tasks.len() - 1;
        self.by_title.insert(title.to_string(), idx);
        idx
    }

    fn task_mut(&mut self, idx: usize) -> &mut Task {
        &mut self.tasks[idx]
    }

    /// Append an imported entry to task `idx`.
    fn push_entry(&mut self, idx: usize, timestamp: DateTime<Utc>, content: &str) {
        self.tasks[idx]
            .entries
            .push(Entry::new(timestamp, content, entry_kind::IMPORTED));
    }

    /// Consume the builder. Tasks without entries are dropped and named in
    /// the returned list; the rest get `created`/`updated` from their
    /// earliest and latest entries.
    fn finish(self) -> (Vec<Task>, Vec<String>) {
        let mut kept = Vec::with_capacity(self.tasks.len());
        let mut empty = Vec::new();
        for mut task in self.tasks {
            if task.entries.is_empty() {
                empty.push(task.title);
                continue;
            }
            fit_times(&mut task);
            kept.push(task);
        }
        (kept, empty)
    }
}

/// Span `created`..`updated` over the task's entry timestamps.
fn fit_times(task: &mut Task) {
    let first = task.entries.iter().map(|e| e.timestamp).min();
    let last = task.entries.iter().map(|e| e.timestamp).max();
    if let (Some(first), Some(last)) = (first, last) {
        task.created = first;
        task.updated = last;
    }
}
