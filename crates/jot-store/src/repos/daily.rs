//! Daily rollups and the daily/weekly log views.

use std::collections::{BTreeSet, HashMap};

use chrono::{Days, NaiveDate};

use jot_core::dates::{DATE_FORMAT, date_key};
use jot_core::entities::{DailyActivity, Entry, Task};
use jot_core::responses::{DailyLog, DailyTaskActivity, WeeklyLog};

use crate::error::StoreError;
use crate::service::JournalService;

/// Collect the entries of `tasks` that fall on `date`.
fn scan_day(date: &str, tasks: &[Task]) -> DailyActivity {
    let mut activity = DailyActivity::new(date);
    for task in tasks {
        for entry in task.entries.iter().filter(|e| date_key(e.timestamp) == date) {
            activity.record(&task.id, entry.clone());
        }
    }
    activity
}

fn to_log(date: NaiveDate, activity: DailyActivity, titles: &HashMap<&str, &str>) -> DailyLog {
    let tasks = activity
        .tasks
        .into_iter()
        .map(|(task_id, mut entries)| {
            entries.sort_by_key(|e| e.timestamp);
            DailyTaskActivity {
                title: titles.get(task_id.as_str()).map(ToString::to_string),
                task_id,
                entries,
            }
        })
        .collect();
    DailyLog { date, tasks }
}

impl JournalService {
    /// Append entries to their dates' rollups.
    ///
    /// Failures are logged and swallowed: the task file is the source of
    /// truth and a stale rollup never fails the mutation that produced it.
    pub(crate) async fn record_daily(&self, task_id: &str, entries: &[Entry]) {
        let mut by_date: HashMap<String, Vec<Entry>> = HashMap::new();
        for entry in entries {
            by_date
                .entry(date_key(entry.timestamp))
                .or_default()
                .push(entry.clone());
        }
        for (date, entries) in by_date {
            if let Err(error) = self.append_daily(&date, task_id, entries).await {
                tracing::warn!(%date, %task_id, %error, "failed to update daily rollup");
            }
        }
    }

    async fn append_daily(
        &self,
        date: &str,
        task_id: &str,
        entries: Vec<Entry>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock_daily(date).await;
        let mut daily = self
            .store()
            .load_daily(date)
            .await?
            .unwrap_or_else(|| DailyActivity::new(date));
        for entry in entries {
            daily.record(task_id, entry);
        }
        self.store().save_daily(&daily).await
    }

    /// Mirror an edited entry into its rollup, if the rollup holds it.
    pub(crate) async fn refresh_daily_entry(&self, task_id: &str, entry: &Entry) {
        let date = date_key(entry.timestamp);
        let _guard = self.lock_daily(&date).await;
        let result = async {
            let Some(mut daily) = self.store().load_daily(&date).await? else {
                return Ok(());
            };
            let slot = daily
                .tasks
                .get_mut(task_id)
                .and_then(|entries| entries.iter_mut().find(|e| e.id == entry.id));
            if let Some(slot) = slot {
                slot.content.clone_from(&entry.content);
                self.store().save_daily(&daily).await?;
            }
            Ok::<_, StoreError>(())
        }
        .await;
        if let Err(error) = result {
            tracing::warn!(%date, %task_id, %error, "failed to refresh daily rollup");
        }
    }

    /// Activity for one date.
    ///
    /// Returns the stored rollup, or builds one by scanning every task and
    /// stores it when it has any activity.
    pub async fn daily_log(&self, date: NaiveDate) -> Result<DailyLog, StoreError> {
        let key = date.format(DATE_FORMAT).to_string();
        let tasks = self.load_tasks().await?.records;
        let titles: HashMap<&str, &str> = tasks
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str()))
            .collect();

        let _guard = self.lock_daily(&key).await;
        let activity = match self.store().load_daily(&key).await? {
            Some(stored) => stored,
            None => {
                let scanned = scan_day(&key, &tasks);
                if !scanned.is_empty() {
                    self.store().save_daily(&scanned).await?;
                    tracing::debug!(date = %key, entries = scanned.entry_count(), "built daily rollup");
                }
                scanned
            }
        };
        Ok(to_log(date, activity, &titles))
    }

    /// Seven daily views starting at `week_start`, with totals.
    ///
    /// Days without a stored rollup are scanned but not persisted.
    pub async fn weekly_log(&self, week_start: NaiveDate) -> Result<WeeklyLog, StoreError> {
        let tasks = self.load_tasks().await?.records;
        let titles: HashMap<&str, &str> = tasks
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str()))
            .collect();

        let mut days = Vec::with_capacity(7);
        let mut worked = BTreeSet::new();
        let mut total_entries = 0;
        let mut week_end = week_start;
        for offset in 0..7 {
            let Some(date) = week_start.checked_add_days(Days::new(offset)) else {
                break;
            };
            week_end = date;
            let key = date.format(DATE_FORMAT).to_string();
            let activity = match self.store().load_daily(&key).await {
                Ok(Some(stored)) => stored,
                Ok(None) => scan_day(&key, &tasks),
                Err(error) => {
                    tracing::warn!(date = %key, %error, "unreadable daily rollup, rescanning");
                    scan_day(&key, &tasks)
                }
            };
            total_entries += activity.entry_count();
            worked.extend(activity.tasks.keys().cloned());
            days.push(to_log(date, activity, &titles));
        }

        Ok(WeeklyLog {
            week_start,
            week_end,
            days,
            total_entries,
            tasks_worked: worked.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use jot_core::entities::entry_kind;
    use jot_core::enums::TaskType;
    use jot_core::requests::{AddEntryArgs, WeeklyLogArgs};
    use pretty_assertions::assert_eq;

    use crate::test_support::test_service;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[tokio::test]
    async fn add_entry_updates_rollup() {
        let (dir, svc) = test_service().await;
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
        svc.store()
            .save_task(&Task::new("t", "Title", TaskType::Work, ts))
            .await
            .unwrap();
        let req = AddEntryArgs {
            task_id: Some("t".into()),
            content: Some("worked on it".into()),
            timestamp: Some("2025-01-15T10:30:00Z".into()),
        }
        .validate()
        .unwrap();
        svc.add_entry(req).await.unwrap();

        assert!(dir.path().join("daily/2025-01-15.json").exists());
        let log = svc.daily_log(day(15)).await.unwrap();
        assert_eq!(log.tasks.len(), 1);
        assert_eq!(log.tasks[0].title.as_deref(), Some("Title"));
        assert_eq!(log.tasks[0].entries[0].content, "worked on it");
    }

    #[tokio::test]
    async fn missing_rollup_is_built_and_saved() {
        let (dir, svc) = test_service().await;
        let ts = Utc.with_ymd_and_hms(2025, 1, 14, 9, 0, 0).unwrap();
        let mut task = Task::new("t", "Title", TaskType::Work, ts);
        task.push_entry(
            Entry::new(ts + chrono::Duration::hours(3), "later", entry_kind::LOG),
            ts,
        );
        svc.store().save_task(&task).await.unwrap();

        let log = svc.daily_log(day(14)).await.unwrap();
        assert_eq!(log.entry_count(), 2);
        assert!(dir.path().join("daily/2025-01-14.json").exists());

        let empty = svc.daily_log(day(20)).await.unwrap();
        assert!(empty.tasks.is_empty());
        assert!(!dir.path().join("daily/2025-01-20.json").exists());
    }

    #[tokio::test]
    async fn weekly_totals() {
        let (_dir, svc) = test_service().await;
        for (id, d) in [("a", 13), ("b", 15), ("c", 25)] {
            let ts = Utc.with_ymd_and_hms(2025, 1, d, 9, 0, 0).unwrap();
            svc.store()
                .save_task(&Task::new(id, id, TaskType::Work, ts))
                .await
                .unwrap();
        }
        let start = WeeklyLogArgs {
            week_start: Some("2025-01-13".into()),
        }
        .validate()
        .unwrap();
        let week = svc.weekly_log(start).await.unwrap();
        assert_eq!(week.week_end, day(19));
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.total_entries, 2);
        assert_eq!(week.tasks_worked, vec!["a".to_string(), "b".to_string()]);
    }
}
