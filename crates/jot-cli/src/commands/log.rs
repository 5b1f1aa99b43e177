use chrono::{Datelike, Days, Local, NaiveDate};
use jot_core::dates::DATE_FORMAT;
use jot_core::requests::{DailyLogArgs, WeeklyLogArgs};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jot log`.
pub async fn handle(action: LogCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    match action {
        LogCommands::Daily { date } => {
            let date = DailyLogArgs {
                date: Some(date.unwrap_or_else(|| format_date(today))),
            }
            .validate()?;
            let log = ctx.service.daily_log(date).await?;
            output(&log, flags.format)
        }
        LogCommands::Weekly { week_start } => {
            let week_start = WeeklyLogArgs {
                week_start: Some(week_start.unwrap_or_else(|| format_date(monday_of(today)))),
            }
            .validate()?;
            let log = ctx.service.weekly_log(week_start).await?;
            output(&log, flags.format)
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::monday_of;

    #[test]
    fn week_defaults_to_monday() {
        let thursday = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        assert_eq!(monday_of(thursday), monday);
        assert_eq!(monday_of(monday), monday);
    }
}
