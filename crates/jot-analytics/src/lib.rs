//! # jot-analytics
//!
//! Derived views over the task corpus: the analytics report (breakdowns,
//! productivity, patterns, trends, insights) and rule-based recommendations.
//!
//! Everything here is computed in memory from a fresh load of the store.
//! Both entry points take `now` explicitly so windows and staleness are
//! reproducible.

pub mod error;
pub mod insights;
pub mod metrics;
pub mod period;
pub mod recommend;
pub mod report;
pub mod trends;

use chrono::{DateTime, Utc};
use jot_core::entities::Task;
use jot_core::enums::TaskType;
use jot_core::requests::{AnalyticsRequest, RecommendationsRequest};
use jot_store::service::JournalService;

use error::AnalyticsError;
use recommend::Recommendations;
use report::AnalyticsReport;

fn of_type(tasks: Vec<Task>, task_type: Option<TaskType>) -> Vec<Task> {
    match task_type {
        Some(ty) => tasks.into_iter().filter(|t| t.task_type == ty).collect(),
        None => tasks,
    }
}

/// Build an analytics report from the current store contents.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the task directory cannot be listed.
pub async fn analytics_report(
    service: &JournalService,
    req: &AnalyticsRequest,
    now: DateTime<Utc>,
) -> Result<AnalyticsReport, AnalyticsError> {
    let loaded = service.load_tasks().await?;
    let tasks = of_type(loaded.records, req.task_type);
    let mut report = report::build_report(&tasks, req, now);
    report.skipped_records = loaded.skipped;
    tracing::debug!(
        report_type = %req.report_type,
        time_period = %req.time_period,
        tasks = tasks.len(),
        "analytics report built"
    );
    Ok(report)
}

/// Produce recommendations from the current store contents.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the task directory cannot be listed.
pub async fn task_recommendations(
    service: &JournalService,
    req: &RecommendationsRequest,
    now: DateTime<Utc>,
) -> Result<Recommendations, AnalyticsError> {
    let loaded = service.load_tasks().await?;
    let mut result = recommend::recommend(&loaded.records, req, now);
    result.skipped_records = loaded.skipped;
    tracing::debug!(
        focus_area = %req.focus_area,
        count = result.recommendations.len(),
        "recommendations built"
    );
    Ok(result)
}
