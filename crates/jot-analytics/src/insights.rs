//! Plain-language observations drawn from the computed metrics.

use chrono::{DateTime, Utc};
use jot_core::entities::Task;

use crate::metrics::{PatternAnalysis, TaskMetrics};

/// Days without an update after which an active task is stale.
pub const STALE_DAYS: i64 = 7;

/// Active tasks not updated for [`STALE_DAYS`] or more.
#[must_use]
pub fn stale_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.is_active() && t.days_since_update(now) >= STALE_DAYS)
        .collect()
}

#[must_use]
pub fn insights(
    tasks: &[Task],
    metrics: &TaskMetrics,
    patterns: &PatternAnalysis,
    now: DateTime<Utc>,
) -> Vec<String> {
    if metrics.total_tasks == 0 {
        return vec!["No tasks recorded yet. Create a task to start tracking work.".to_string()];
    }
    let mut out = Vec::new();

    if let Some(ty) = patterns.most_frequent_type {
        let n = metrics.by_type.get(ty.as_str()).copied().unwrap_or(0);
        out.push(format!(
            "Most of your tasks are {ty} tasks ({n} of {}).",
            metrics.total_tasks
        ));
    }

    let stale = stale_tasks(tasks, now).len();
    if stale > 0 {
        out.push(format!(
            "{stale} active task(s) have not been updated in {STALE_DAYS}+ days."
        ));
    }

    let density = metrics.average_entries_per_task;
    if density >= 5.0 {
        out.push(format!("Tasks are well documented with {density:.1} entries on average."));
    } else if density < 2.0 {
        out.push(format!(
            "Tasks average {density:.1} entries. Logging progress more often makes reviews easier."
        ));
    }

    let rate = metrics.completion_rate * 100.0;
    if rate >= 70.0 {
        out.push(format!("Strong completion rate of {rate:.0}%."));
    } else if rate < 30.0 && metrics.total_tasks >= 3 {
        out.push(format!(
            "Completion rate is {rate:.0}%. Consider closing or pausing work that has stalled."
        ));
    }
    out
}
