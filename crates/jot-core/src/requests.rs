//! Raw argument structs and their validated requests.
//!
//! Every operation is invoked with a small map of named string/array
//! arguments. Each `*Args` struct is that map (deserializable straight from a
//! JSON object); `validate()` turns it into a typed request or a
//! [`CoreError`]. Filter-only dates stay lenient through validation.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dates::{DateRange, parse_date_strict};
use crate::enums::{
    ExportFormat, FocusArea, ImportFormat, ReportType, TaskStatus, TaskType, TimePeriod,
    parse_choice,
};
use crate::errors::CoreError;
use crate::ids::is_valid_task_id;

/// Defaults applied while validating arguments. Sourced from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub list_limit: usize,
    pub max_list_limit: usize,
    pub history_limit: usize,
    pub import_prefix: String,
    pub import_type: TaskType,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            list_limit: 50,
            max_list_limit: 200,
            history_limit: 10,
            import_prefix: "IMPORT".to_string(),
            import_type: TaskType::Personal,
        }
    }
}

/// Default number of recommendations.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;
/// Upper bound on recommendations per call.
pub const MAX_RECOMMENDATION_LIMIT: usize = 20;

fn required(value: Option<String>, field: &str) -> Result<String, CoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::MissingArgument(field.to_string()))
}

/// A required task ID that is usable as a record file name.
fn task_key(value: Option<String>, field: &str) -> Result<String, CoreError> {
    let id = required(value, field)?.trim().to_string();
    if !is_valid_task_id(&id) {
        return Err(CoreError::Validation(format!(
            "{field} '{id}' cannot contain path separators or control characters"
        )));
    }
    Ok(id)
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn optional_choice<T: crate::enums::Choice>(
    value: Option<String>,
    field: &str,
) -> Result<Option<T>, CoreError> {
    optional(value)
        .map(|raw| parse_choice::<T>(&raw, field))
        .transpose()
}

/// Parse a positive count, falling back to `default` for anything else.
fn lenient_count(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn lenient_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(error) => {
            tracing::debug!(value = raw, %error, "ignoring malformed entry timestamp");
            None
        }
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Task operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskArgs {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub issue_url: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub id: String,
    pub title: String,
    pub task_type: TaskType,
    pub tags: Vec<String>,
    pub issue_url: Option<String>,
    pub priority: Option<String>,
}

impl CreateTaskArgs {
    /// # Errors
    ///
    /// Returns `CoreError` when `id`, `title`, or `type` is missing, the ID is
    /// not usable as a file name, or the type is unknown.
    pub fn validate(self) -> Result<CreateTaskRequest, CoreError> {
        let id = task_key(self.id, "id")?;
        let title = required(self.title, "title")?;
        let task_type = parse_choice(&required(self.task_type, "type")?, "type")?;
        Ok(CreateTaskRequest {
            id,
            title,
            task_type,
            tags: clean_list(self.tags),
            issue_url: optional(self.issue_url),
            priority: optional(self.priority),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AddEntryArgs {
    pub task_id: Option<String>,
    pub content: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEntryRequest {
    pub task_id: String,
    pub content: String,
    /// Explicit entry time; `None` means "now". Malformed input is dropped.
    pub timestamp: Option<DateTime<Utc>>,
}

impl AddEntryArgs {
    /// # Errors
    ///
    /// Returns `CoreError::MissingArgument` when `task_id` or `content` is
    /// missing and `CoreError::Validation` when `task_id` is not a usable ID.
    pub fn validate(self) -> Result<AddEntryRequest, CoreError> {
        Ok(AddEntryRequest {
            task_id: task_key(self.task_id, "task_id")?,
            content: required(self.content, "content")?,
            timestamp: lenient_timestamp(self.timestamp.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEntryArgs {
    pub task_id: Option<String>,
    pub entry_id: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEntryRequest {
    pub task_id: String,
    pub entry_id: String,
    pub content: String,
}

impl UpdateEntryArgs {
    /// # Errors
    ///
    /// Returns `CoreError::MissingArgument` for any missing field and
    /// `CoreError::Validation` when `task_id` is not a usable ID.
    pub fn validate(self) -> Result<UpdateEntryRequest, CoreError> {
        Ok(UpdateEntryRequest {
            task_id: task_key(self.task_id, "task_id")?,
            entry_id: required(self.entry_id, "entry_id")?,
            content: required(self.content, "content")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct UpdateStatusArgs {
    pub task_id: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    pub task_id: String,
    pub status: TaskStatus,
    pub reason: Option<String>,
}

impl UpdateStatusArgs {
    /// # Errors
    ///
    /// Returns `CoreError` when a field is missing, the task ID is not usable,
    /// or the status is unknown.
    pub fn validate(self) -> Result<UpdateStatusRequest, CoreError> {
        let task_id = task_key(self.task_id, "task_id")?;
        let status = parse_choice(&required(self.status, "status")?, "status")?;
        Ok(UpdateStatusRequest {
            task_id,
            status,
            reason: optional(self.reason),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetTaskArgs {
    pub task_id: Option<String>,
}

impl GetTaskArgs {
    /// # Errors
    ///
    /// Returns `CoreError::MissingArgument` when `task_id` is missing and
    /// `CoreError::Validation` when it is not a usable ID.
    pub fn validate(self) -> Result<String, CoreError> {
        task_key(self.task_id, "task_id")
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Predicates applied to an in-memory task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub task_type: Option<TaskType>,
    /// Match-any tag membership. Empty means no tag filter.
    pub tags: Vec<String>,
    /// Applied to `updated`.
    pub range: DateRange,
}

/// Offset/limit page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListTasksArgs {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTasksRequest {
    pub filter: TaskFilter,
    pub page: PageRequest,
}

impl ListTasksArgs {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` for an unknown status or type.
    /// Malformed dates, limits, and offsets fall back to their defaults.
    pub fn validate(self, defaults: &RequestDefaults) -> Result<ListTasksRequest, CoreError> {
        let filter = TaskFilter {
            status: optional_choice(self.status, "status")?,
            task_type: optional_choice(self.task_type, "type")?,
            tags: clean_list(self.tags),
            range: DateRange::lenient(self.date_from.as_deref(), self.date_to.as_deref()),
        };
        let limit = lenient_count(self.limit.as_deref(), defaults.list_limit)
            .min(defaults.max_list_limit);
        let offset = self
            .offset
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(0);
        Ok(ListTasksRequest {
            filter,
            page: PageRequest { offset, limit },
        })
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub task_type: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub task_type: Option<TaskType>,
    /// Applied to entry timestamps and meeting dates.
    pub range: DateRange,
}

impl SearchArgs {
    /// # Errors
    ///
    /// Returns `CoreError` when the query is blank or the task type is unknown.
    pub fn validate(self) -> Result<SearchRequest, CoreError> {
        Ok(SearchRequest {
            query: required(self.query, "query")?,
            task_type: optional_choice(self.task_type, "task_type")?,
            range: DateRange::lenient(self.date_from.as_deref(), self.date_to.as_deref()),
        })
    }
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImportArgs {
    pub content: Option<String>,
    pub format: Option<String>,
    pub task_prefix: Option<String>,
    pub default_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub content: String,
    pub format: ImportFormat,
    pub task_prefix: String,
    pub default_type: TaskType,
}

impl ImportArgs {
    /// # Errors
    ///
    /// Returns `CoreError` for missing content or format, an unsupported
    /// format, or an unknown default type.
    pub fn validate(self, defaults: &RequestDefaults) -> Result<ImportRequest, CoreError> {
        let content = required(self.content, "content")?;
        let format = parse_choice(&required(self.format, "format")?, "format")?;
        let default_type = optional_choice(self.default_type, "default_type")?
            .unwrap_or(defaults.import_type);
        let task_prefix =
            optional(self.task_prefix).unwrap_or_else(|| defaults.import_prefix.clone());
        if !is_valid_task_id(&task_prefix) {
            return Err(CoreError::Validation(format!(
                "task_prefix '{task_prefix}' cannot contain path separators"
            )));
        }
        Ok(ImportRequest {
            content,
            format,
            task_prefix,
            default_type,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExportArgs {
    pub format: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub task_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Applied to entry timestamps and meeting dates.
    pub range: DateRange,
    pub task_type: Option<TaskType>,
}

impl ExportArgs {
    /// # Errors
    ///
    /// Returns `CoreError` for a missing/unknown format or unknown task type.
    pub fn validate(self) -> Result<ExportRequest, CoreError> {
        Ok(ExportRequest {
            format: parse_choice(&required(self.format, "format")?, "format")?,
            range: DateRange::lenient(self.date_from.as_deref(), self.date_to.as_deref()),
            task_type: optional_choice(self.task_filter, "task_filter")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Logs and meetings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DailyLogArgs {
    pub date: Option<String>,
}

impl DailyLogArgs {
    /// # Errors
    ///
    /// Returns `CoreError` when the date is missing or not `YYYY-MM-DD`.
    pub fn validate(self) -> Result<NaiveDate, CoreError> {
        parse_date_strict(self.date.as_deref().unwrap_or_default(), "date")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyLogArgs {
    pub week_start: Option<String>,
}

impl WeeklyLogArgs {
    /// # Errors
    ///
    /// Returns `CoreError` when the week start is missing or not `YYYY-MM-DD`.
    pub fn validate(self) -> Result<NaiveDate, CoreError> {
        parse_date_strict(self.week_start.as_deref().unwrap_or_default(), "week_start")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateOneOnOneArgs {
    pub date: Option<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub todos: Vec<String>,
    #[serde(default)]
    pub feedback: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOneOnOneRequest {
    pub date: NaiveDate,
    pub insights: Vec<String>,
    pub todos: Vec<String>,
    pub feedback: Vec<String>,
    pub notes: String,
}

impl CreateOneOnOneArgs {
    /// # Errors
    ///
    /// Returns `CoreError` when the date is missing or not `YYYY-MM-DD`.
    pub fn validate(self) -> Result<CreateOneOnOneRequest, CoreError> {
        Ok(CreateOneOnOneRequest {
            date: parse_date_strict(self.date.as_deref().unwrap_or_default(), "date")?,
            insights: clean_list(self.insights),
            todos: clean_list(self.todos),
            feedback: clean_list(self.feedback),
            notes: optional(self.notes).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OneOnOneHistoryArgs {
    pub limit: Option<String>,
}

impl OneOnOneHistoryArgs {
    #[must_use]
    pub fn validate(self, defaults: &RequestDefaults) -> usize {
        lenient_count(self.limit.as_deref(), defaults.history_limit)
    }
}

// ---------------------------------------------------------------------------
// Analytics and recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationsArgs {
    pub task_type: Option<String>,
    pub focus_area: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationsRequest {
    pub task_type: Option<TaskType>,
    pub focus_area: FocusArea,
    pub limit: usize,
}

impl RecommendationsArgs {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` for an unknown task type or focus area.
    pub fn validate(self) -> Result<RecommendationsRequest, CoreError> {
        Ok(RecommendationsRequest {
            task_type: optional_choice(self.task_type, "task_type")?,
            focus_area: optional_choice(self.focus_area, "focus_area")?.unwrap_or_default(),
            limit: lenient_count(self.limit.as_deref(), DEFAULT_RECOMMENDATION_LIMIT)
                .min(MAX_RECOMMENDATION_LIMIT),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsArgs {
    pub report_type: Option<String>,
    pub time_period: Option<String>,
    pub task_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsRequest {
    pub report_type: ReportType,
    pub time_period: TimePeriod,
    pub task_type: Option<TaskType>,
}

impl AnalyticsArgs {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` for an unknown report type, period,
    /// or task type.
    pub fn validate(self) -> Result<AnalyticsRequest, CoreError> {
        Ok(AnalyticsRequest {
            report_type: optional_choice(self.report_type, "report_type")?.unwrap_or_default(),
            time_period: optional_choice(self.time_period, "time_period")?.unwrap_or_default(),
            task_type: optional_choice(self.task_type, "task_type")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn create_task_requires_fields() {
        let err = CreateTaskArgs {
            id: Some("t-1".into()),
            title: None,
            task_type: Some("work".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn create_task_rejects_path_like_id() {
        let err = CreateTaskArgs {
            id: Some("../escape".into()),
            title: Some("x".into()),
            task_type: Some("work".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn create_task_from_json_map() {
        let args: CreateTaskArgs = serde_json::from_value(serde_json::json!({
            "id": "learning-graphql",
            "title": "Learn GraphQL",
            "type": "learning",
            "tags": ["api", " ", "graphql"],
            "priority": "high"
        }))
        .unwrap();
        let req = args.validate().unwrap();
        assert_eq!(req.task_type, TaskType::Learning);
        assert_eq!(req.tags, vec!["api".to_string(), "graphql".to_string()]);
        assert_eq!(req.priority.as_deref(), Some("high"));
        assert_eq!(req.issue_url, None);
    }

    #[rstest]
    #[case("../outside")]
    #[case("nested/task")]
    #[case("..")]
    fn lookups_reject_path_like_task_ids(#[case] raw: &str) {
        let task_id = || Some(raw.to_string());
        let errors = [
            AddEntryArgs { task_id: task_id(), content: Some("c".into()), timestamp: None }
                .validate()
                .unwrap_err(),
            UpdateEntryArgs {
                task_id: task_id(),
                entry_id: Some("entry_1".into()),
                content: Some("c".into()),
            }
            .validate()
            .unwrap_err(),
            UpdateStatusArgs { task_id: task_id(), status: Some("paused".into()), reason: None }
                .validate()
                .unwrap_err(),
            GetTaskArgs { task_id: task_id() }.validate().unwrap_err(),
        ];
        for err in errors {
            assert!(matches!(err, CoreError::Validation(_)), "{err}");
            assert!(err.to_string().contains("task_id '"));
        }
    }

    #[test]
    fn add_entry_drops_bad_timestamp() {
        let req = AddEntryArgs {
            task_id: Some("t".into()),
            content: Some("c".into()),
            timestamp: Some("yesterday".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(req.timestamp, None);

        let req = AddEntryArgs {
            task_id: Some("t".into()),
            content: Some("c".into()),
            timestamp: Some("2025-01-02T10:00:00Z".into()),
        }
        .validate()
        .unwrap();
        assert!(req.timestamp.is_some());
    }

    #[test]
    fn status_outside_enum_is_rejected() {
        let err = UpdateStatusArgs {
            task_id: Some("t".into()),
            status: Some("done".into()),
            reason: None,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidValue { .. }));
    }

    #[rstest]
    #[case(None, None, 50, 0)]
    #[case(Some("10"), Some("5"), 10, 5)]
    #[case(Some("500"), None, 200, 0)]
    #[case(Some("0"), Some("-3"), 50, 0)]
    #[case(Some("abc"), Some("x"), 50, 0)]
    fn list_pagination_defaults(
        #[case] limit: Option<&str>,
        #[case] offset: Option<&str>,
        #[case] want_limit: usize,
        #[case] want_offset: usize,
    ) {
        let req = ListTasksArgs {
            limit: limit.map(String::from),
            offset: offset.map(String::from),
            ..Default::default()
        }
        .validate(&RequestDefaults::default())
        .unwrap();
        assert_eq!(req.page, PageRequest { offset: want_offset, limit: want_limit });
    }

    #[test]
    fn list_ignores_invalid_dates() {
        let with_bad = ListTasksArgs {
            date_from: Some("15/01/2025".into()),
            ..Default::default()
        }
        .validate(&RequestDefaults::default())
        .unwrap();
        let without = ListTasksArgs::default()
            .validate(&RequestDefaults::default())
            .unwrap();
        assert_eq!(with_bad, without);
    }

    #[rstest]
    #[case(ImportArgs { content: None, format: Some("txt".into()), ..Default::default() }, "content is required")]
    #[case(ImportArgs { content: Some("x".into()), format: None, ..Default::default() }, "format is required")]
    #[case(
        ImportArgs { content: Some("x".into()), format: Some("xml".into()), ..Default::default() },
        "format must be one of: txt, markdown, json, csv (got 'xml')"
    )]
    #[case(
        ImportArgs {
            content: Some("x".into()),
            format: Some("txt".into()),
            default_type: Some("invalid".into()),
            ..Default::default()
        },
        "default_type must be one of: work, learning, personal, investigation (got 'invalid')"
    )]
    fn import_validation_messages(#[case] args: ImportArgs, #[case] message: &str) {
        let err = args.validate(&RequestDefaults::default()).unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn import_defaults_applied() {
        let req = ImportArgs {
            content: Some("line".into()),
            format: Some("Markdown".into()),
            ..Default::default()
        }
        .validate(&RequestDefaults::default())
        .unwrap();
        assert_eq!(req.format, ImportFormat::Markdown);
        assert_eq!(req.task_prefix, "IMPORT");
        assert_eq!(req.default_type, TaskType::Personal);
    }

    #[test]
    fn daily_log_date_is_strict() {
        let err = DailyLogArgs {
            date: Some("2025-1-5x".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { .. }));
    }

    #[test]
    fn recommendations_limit_is_clamped() {
        let req = RecommendationsArgs {
            limit: Some("50".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(req.limit, MAX_RECOMMENDATION_LIMIT);
        assert_eq!(req.focus_area, FocusArea::Productivity);

        let req = RecommendationsArgs::default().validate().unwrap();
        assert_eq!(req.limit, DEFAULT_RECOMMENDATION_LIMIT);
    }

    #[test]
    fn analytics_defaults() {
        let req = AnalyticsArgs::default().validate().unwrap();
        assert_eq!(req.report_type, ReportType::Overview);
        assert_eq!(req.time_period, TimePeriod::Month);
        assert_eq!(req.task_type, None);
    }
}
