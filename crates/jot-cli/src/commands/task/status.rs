use jot_core::requests::UpdateStatusArgs;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    task_id: String,
    status: String,
    reason: Option<String>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let req = UpdateStatusArgs {
        task_id: Some(task_id),
        status: Some(status),
        reason,
    }
    .validate()?;
    let response = ctx.service.update_status(req).await?;
    output(&response, flags.format)
}
