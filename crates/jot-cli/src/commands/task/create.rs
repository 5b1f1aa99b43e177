use jot_core::requests::CreateTaskArgs;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct CreateInput {
    pub id: String,
    pub title: String,
    pub task_type: String,
    pub tags: Vec<String>,
    pub issue_url: Option<String>,
    pub priority: Option<String>,
}

pub async fn run(input: CreateInput, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let req = CreateTaskArgs {
        id: Some(input.id),
        title: Some(input.title),
        task_type: Some(input.task_type),
        tags: input.tags,
        issue_url: input.issue_url,
        priority: input.priority,
    }
    .validate()?;
    let task = ctx.service.create_task(req).await?;
    output(&task, flags.format)
}
