//! In-memory substring search over tasks and meetings.

use jot_core::dates::{parse_date_lenient, start_of_day};
use jot_core::entities::{Entry, OneOnOne, Task, entry_kind};
use jot_core::enums::SearchContext;
use jot_core::requests::SearchRequest;
use jot_core::responses::SearchHit;

use crate::error::SearchError;
use crate::snippet::snippet;

/// Task ID reported for meeting hits.
pub const ONE_ON_ONE_TASK_ID: &str = "one-on-one";

/// Search `tasks` and `meetings`, newest hit first.
///
/// Every entry inside the date range is a hit when either the task title or
/// the entry content contains the query (case-insensitively). Meetings match
/// over notes, insights, todos, and feedback.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for a blank query.
pub fn search(
    tasks: &[Task],
    meetings: &[OneOnOne],
    req: &SearchRequest,
) -> Result<Vec<SearchHit>, SearchError> {
    let needle = req.query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(SearchError::InvalidQuery("query must not be blank".into()));
    }

    let mut hits = Vec::new();
    for task in tasks
        .iter()
        .filter(|t| req.task_type.is_none_or(|ty| t.task_type == ty))
    {
        let title_matches = task.title.to_lowercase().contains(&needle);
        for entry in task.entries.iter().filter(|e| req.range.contains(e.timestamp)) {
            let entry_matches = entry.content.to_lowercase().contains(&needle);
            if let Some(context) = SearchContext::classify(title_matches, entry_matches) {
                hits.push(SearchHit {
                    task_id: task.id.clone(),
                    task_title: task.title.clone(),
                    snippet: snippet(&entry.content, &needle),
                    entry: entry.clone(),
                    context,
                });
            }
        }
    }

    for meeting in meetings {
        if let Some(hit) = meeting_hit(meeting, &needle, req) {
            hits.push(hit);
        }
    }

    hits.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
    Ok(hits)
}

fn meeting_hit(meeting: &OneOnOne, needle: &str, req: &SearchRequest) -> Option<SearchHit> {
    let Some(date) = parse_date_lenient(Some(&meeting.date)) else {
        tracing::debug!(date = %meeting.date, "skipping meeting with malformed date");
        return None;
    };
    let timestamp = start_of_day(date);
    if !req.range.contains(timestamp) || !meeting.search_text().contains(needle) {
        return None;
    }

    let content = if meeting.notes.is_empty() {
        [&meeting.insights, &meeting.todos, &meeting.feedback]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("; ")
    } else {
        meeting.notes.clone()
    };
    let entry = Entry {
        id: format!("{ONE_ON_ONE_TASK_ID}-{}", meeting.date),
        timestamp,
        content,
        entry_type: entry_kind::ONE_ON_ONE.to_string(),
    };
    Some(SearchHit {
        task_id: ONE_ON_ONE_TASK_ID.to_string(),
        task_title: format!("One-on-One: {}", meeting.date),
        snippet: snippet(&entry.content, needle),
        entry,
        context: SearchContext::OneOnOne,
    })
}
