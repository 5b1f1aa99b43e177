//! Entry ID generation and identifier helpers.
//!
//! Entry IDs are time-derived: `entry_<unix nanos>`. Two entries created in
//! the same nanosecond (bulk import does this) are bumped forward so IDs stay
//! strictly increasing within a process.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Prefix for every generated entry ID.
pub const ENTRY_PREFIX: &str = "entry_";

static LAST_ENTRY_NANOS: AtomicI64 = AtomicI64::new(0);

/// Generate a unique, time-derived entry ID.
#[must_use]
pub fn new_entry_id() -> String {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut last = LAST_ENTRY_NANOS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_ENTRY_NANOS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return format!("{ENTRY_PREFIX}{next}"),
            Err(actual) => last = actual,
        }
    }
}

/// Reduce free text to a filename-safe ID segment.
///
/// Keeps ASCII alphanumerics, `-` and `_`; every other run of characters
/// collapses to a single `-`. Leading and trailing separators are trimmed.
/// Returns an empty string when nothing usable remains.
#[must_use]
pub fn sanitize_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// Whether a caller-supplied task ID is safe to use as a file stem.
#[must_use]
pub fn is_valid_task_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}

/// Derive an issue reference from a tracker URL.
///
/// - GitHub: the last path segment (`.../issues/123` → `123`).
/// - Jira / Atlassian: the first path segment containing `-` that is longer
///   than three characters (`.../browse/PROJ-42` → `PROJ-42`).
#[must_use]
pub fn issue_id_from_url(url: &str) -> Option<String> {
    if url.contains("github.com") {
        return url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(String::from);
    }
    if url.contains("jira") || url.contains("atlassian") {
        return url
            .split('/')
            .find(|part| part.contains('-') && part.len() > 3)
            .map(String::from);
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn entry_ids_are_unique_and_prefixed() {
        let mut seen = HashSet::new();
        for _ in 0..1_000 {
            let id = new_entry_id();
            assert!(id.starts_with(ENTRY_PREFIX));
            assert!(seen.insert(id), "duplicate entry id");
        }
    }

    #[test]
    fn sanitize_collapses_separators() {
        assert_eq!(sanitize_segment("  Task 1: Review PR!  "), "task-1-review-pr");
        assert_eq!(sanitize_segment("learning_graphql"), "learning_graphql");
        assert_eq!(sanitize_segment("***"), "");
    }

    #[test]
    fn github_issue_id() {
        assert_eq!(
            issue_id_from_url("https://github.com/owner/repo/issues/123").as_deref(),
            Some("123")
        );
    }

    #[test]
    fn jira_issue_id() {
        assert_eq!(
            issue_id_from_url("https://acme.atlassian.net/browse/MDU-1450").as_deref(),
            Some("MDU-1450")
        );
    }

    #[test]
    fn unknown_tracker_has_no_issue_id() {
        assert_eq!(issue_id_from_url("https://example.com/ticket/9"), None);
    }

    #[test]
    fn task_id_validation() {
        assert!(is_valid_task_id("MDU-1450"));
        assert!(is_valid_task_id("learning graphql"));
        assert!(!is_valid_task_id("../etc/passwd"));
        assert!(!is_valid_task_id(""));
        assert!(!is_valid_task_id(".."));
    }
}
