use chrono::Utc;
use jot_analytics::analytics_report;
use jot_core::requests;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyticsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jot analytics`.
pub async fn handle(
    args: AnalyticsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let req = requests::AnalyticsArgs {
        report_type: args.report,
        time_period: args.period,
        task_type: args.task_type,
    }
    .validate()?;
    let report = analytics_report(&ctx.service, &req, Utc::now()).await?;
    output(&report, flags.format)
}
