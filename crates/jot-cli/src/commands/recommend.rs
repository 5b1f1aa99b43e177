use chrono::Utc;
use jot_analytics::task_recommendations;
use jot_core::requests::RecommendationsArgs;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecommendArgs;
use crate::commands::shared::limit::limit_arg;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jot recommend`.
pub async fn handle(
    args: RecommendArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let req = RecommendationsArgs {
        task_type: args.task_type,
        focus_area: args.focus,
        limit: limit_arg(flags.limit),
    }
    .validate()?;
    let recommendations = task_recommendations(&ctx.service, &req, Utc::now()).await?;
    output(&recommendations, flags.format)
}
