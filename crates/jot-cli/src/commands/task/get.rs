use jot_core::requests::GetTaskArgs;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(task_id: String, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task_id = GetTaskArgs {
        task_id: Some(task_id),
    }
    .validate()?;
    let task = ctx.service.get_task(&task_id).await?;
    output(&task, flags.format)
}
