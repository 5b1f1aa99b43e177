use jot_core::requests::UpdateEntryArgs;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    task_id: String,
    entry_id: String,
    content: String,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let req = UpdateEntryArgs {
        task_id: Some(task_id),
        entry_id: Some(entry_id),
        content: Some(content),
    }
    .validate()?;
    let response = ctx.service.update_entry(req).await?;
    output(&response, flags.format)
}
