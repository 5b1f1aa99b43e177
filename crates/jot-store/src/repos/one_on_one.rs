//! One-on-one meeting records.

use chrono::Utc;

use jot_core::dates::DATE_FORMAT;
use jot_core::entities::OneOnOne;
use jot_core::requests::CreateOneOnOneRequest;
use jot_core::responses::OneOnOneHistory;

use crate::LoadReport;
use crate::error::StoreError;
use crate::service::JournalService;

impl JournalService {
    /// Write the meeting for a date, replacing any earlier record for it.
    pub async fn create_one_on_one(
        &self,
        req: CreateOneOnOneRequest,
    ) -> Result<OneOnOne, StoreError> {
        let meeting = OneOnOne {
            date: req.date.format(DATE_FORMAT).to_string(),
            insights: req.insights,
            todos: req.todos,
            feedback: req.feedback,
            notes: req.notes,
            created: Utc::now(),
        };
        self.store().save_one_on_one(&meeting).await?;
        tracing::info!(date = %meeting.date, "saved one-on-one");
        Ok(meeting)
    }

    /// Every readable meeting, most recent date first.
    pub async fn load_one_on_ones(&self) -> Result<LoadReport<OneOnOne>, StoreError> {
        let mut report = self.store().load_all_one_on_ones().await?;
        report.records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(report)
    }

    /// The `limit` most recent meetings.
    pub async fn one_on_one_history(&self, limit: usize) -> Result<OneOnOneHistory, StoreError> {
        let report = self.load_one_on_ones().await?;
        Ok(OneOnOneHistory {
            meetings: report.records.into_iter().take(limit).collect(),
            skipped_records: report.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use jot_core::requests::{CreateOneOnOneArgs, OneOnOneHistoryArgs, RequestDefaults};
    use pretty_assertions::assert_eq;

    use crate::test_support::test_service;

    fn meeting(date: &str, note: &str) -> CreateOneOnOneArgs {
        CreateOneOnOneArgs {
            date: Some(date.into()),
            notes: Some(note.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn history_is_most_recent_first() {
        let (_dir, svc) = test_service().await;
        for date in ["2025-01-08", "2025-01-22", "2025-01-15"] {
            let req = meeting(date, "weekly sync").validate().unwrap();
            svc.create_one_on_one(req).await.unwrap();
        }
        let limit = OneOnOneHistoryArgs {
            limit: Some("2".into()),
        }
        .validate(&RequestDefaults::default());
        let history = svc.one_on_one_history(limit).await.unwrap();
        let dates: Vec<_> = history.meetings.iter().map(|m| m.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-22", "2025-01-15"]);
    }

    #[tokio::test]
    async fn same_date_overwrites() {
        let (_dir, svc) = test_service().await;
        svc.create_one_on_one(meeting("2025-01-15", "first").validate().unwrap())
            .await
            .unwrap();
        svc.create_one_on_one(meeting("2025-01-15", "second").validate().unwrap())
            .await
            .unwrap();
        let history = svc.one_on_one_history(10).await.unwrap();
        assert_eq!(history.meetings.len(), 1);
        assert_eq!(history.meetings[0].notes, "second");
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = meeting("15-01-2025", "x").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date format. Expected YYYY-MM-DD (e.g., 2025-01-15), got: 15-01-2025"
        );
    }
}
