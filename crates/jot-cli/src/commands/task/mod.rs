use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

mod create;
mod edit_entry;
mod entry;
mod get;
mod list;
mod status;

/// Handle `jot task`.
pub async fn handle(action: TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::Create {
            id,
            title,
            task_type,
            tags,
            issue_url,
            priority,
        } => {
            let args = create::CreateInput {
                id,
                title,
                task_type,
                tags,
                issue_url,
                priority,
            };
            create::run(args, ctx, flags).await
        }
        TaskCommands::Entry { task_id, content, at } => {
            entry::run(task_id, content, at, ctx, flags).await
        }
        TaskCommands::EditEntry {
            task_id,
            entry_id,
            content,
        } => edit_entry::run(task_id, entry_id, content, ctx, flags).await,
        TaskCommands::Status {
            task_id,
            status,
            reason,
        } => status::run(task_id, status, reason, ctx, flags).await,
        TaskCommands::Get { task_id } => get::run(task_id, ctx, flags).await,
        TaskCommands::List {
            status,
            task_type,
            tags,
            from,
            to,
            offset,
        } => {
            let filters = list::ListInput {
                status,
                task_type,
                tags,
                from,
                to,
                offset,
            };
            list::run(filters, ctx, flags).await
        }
    }
}
