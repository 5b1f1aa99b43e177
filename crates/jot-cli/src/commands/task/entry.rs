use jot_core::requests::AddEntryArgs;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    task_id: String,
    content: String,
    at: Option<String>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(raw) = at.as_deref()
        && chrono::DateTime::parse_from_rfc3339(raw).is_err()
    {
        tracing::warn!(value = raw, "--at is not RFC 3339; recording the entry at the current time");
    }
    let req = AddEntryArgs {
        task_id: Some(task_id),
        content: Some(content),
        timestamp: at,
    }
    .validate()?;
    let response = ctx.service.add_entry(req).await?;
    output(&response, flags.format)
}
