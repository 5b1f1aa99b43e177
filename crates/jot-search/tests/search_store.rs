//! Search against a real store on disk.

use chrono::{TimeZone, Utc};
use jot_core::entities::{Entry, OneOnOne, Task, entry_kind};
use jot_core::enums::{SearchContext, TaskType};
use jot_core::requests::{RequestDefaults, SearchArgs};
use jot_search::search_entries;
use jot_store::JournalStore;
use jot_store::service::JournalService;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

async fn service() -> (TempDir, JournalService) {
    let dir = TempDir::new().unwrap();
    let store = JournalStore::open(dir.path(), true).await.unwrap();
    (dir, JournalService::new(store, RequestDefaults::default()))
}

#[tokio::test]
async fn finds_entries_and_meetings() {
    let (dir, svc) = service().await;
    let ts = Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap();
    let mut task = Task::new("infra", "Infra upgrades", TaskType::Work, ts);
    task.push_entry(Entry::new(ts, "Rotated the kafka certificates", entry_kind::LOG), ts);
    svc.store().save_task(&task).await.unwrap();
    svc.store()
        .save_one_on_one(&OneOnOne {
            date: "2025-02-05".into(),
            insights: vec![],
            todos: vec!["Write up the Kafka incident".into()],
            feedback: vec![],
            notes: String::new(),
            created: ts,
        })
        .await
        .unwrap();
    std::fs::write(dir.path().join("tasks/corrupt.json"), "nope").unwrap();

    let req = SearchArgs {
        query: Some("kafka".into()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    let results = search_entries(&svc, &req).await.unwrap();

    assert_eq!(results.total, 2);
    assert_eq!(results.hits[0].context, SearchContext::OneOnOne);
    assert_eq!(results.hits[1].context, SearchContext::Entry);
    assert_eq!(results.skipped_records.len(), 1);
}

#[test]
fn empty_query_fails_validation() {
    let err = SearchArgs {
        query: Some("  ".into()),
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.to_string(), "query is required");
}
