use jot_core::requests::{CreateOneOnOneArgs, OneOnOneHistoryArgs};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MeetingCommands;
use crate::commands::shared::limit::limit_arg;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jot meeting`.
pub async fn handle(
    action: MeetingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MeetingCommands::Create {
            date,
            insights,
            todos,
            feedback,
            notes,
        } => {
            let req = CreateOneOnOneArgs {
                date: Some(date),
                insights,
                todos,
                feedback,
                notes,
            }
            .validate()?;
            let meeting = ctx.service.create_one_on_one(req).await?;
            output(&meeting, flags.format)
        }
        MeetingCommands::History => {
            let limit = OneOnOneHistoryArgs {
                limit: limit_arg(flags.limit),
            }
            .validate(ctx.service.defaults());
            let history = ctx.service.one_on_one_history(limit).await?;
            output(&history, flags.format)
        }
    }
}
