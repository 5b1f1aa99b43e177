//! Task filtering and pagination over an in-memory task set.

use jot_core::entities::Task;
use jot_core::requests::{PageRequest, TaskFilter};

/// Whether `task` satisfies every predicate in `filter`.
#[must_use]
pub fn matches(task: &Task, filter: &TaskFilter) -> bool {
    filter.status.is_none_or(|s| task.status == s)
        && filter.task_type.is_none_or(|t| task.task_type == t)
        && (filter.tags.is_empty() || filter.tags.iter().any(|tag| task.has_tag(tag)))
        && filter.range.contains(task.updated)
}

/// Filter, sort most recently updated first, then slice.
///
/// Returns the page and the post-filter total. Ties on `updated` are broken
/// by ID so pages are stable across calls.
#[must_use]
pub fn select(tasks: Vec<Task>, filter: &TaskFilter, page: PageRequest) -> (Vec<Task>, usize) {
    let mut kept: Vec<Task> = tasks.into_iter().filter(|t| matches(t, filter)).collect();
    kept.sort_by(|a, b| b.updated.cmp(&a.updated).then_with(|| a.id.cmp(&b.id)));
    let total = kept.len();
    let slice = kept.into_iter().skip(page.offset).take(page.limit).collect();
    (slice, total)
}
