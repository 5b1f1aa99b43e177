use jot_core::requests;
use jot_search::search_entries;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `jot search`.
pub async fn handle(args: SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let req = requests::SearchArgs {
        query: Some(args.query),
        task_type: args.task_type,
        date_from: args.from,
        date_to: args.to,
    }
    .validate()?;
    let results = search_entries(&ctx.service, &req).await?;
    output(&results, flags.format)
}
