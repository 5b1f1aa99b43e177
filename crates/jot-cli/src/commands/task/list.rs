use jot_core::requests::ListTasksArgs;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::limit_arg;
use crate::context::AppContext;
use crate::output::output;

pub struct ListInput {
    pub status: Option<String>,
    pub task_type: Option<String>,
    pub tags: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub offset: Option<u32>,
}

fn list_args(input: ListInput, limit: Option<u32>) -> ListTasksArgs {
    ListTasksArgs {
        status: input.status,
        task_type: input.task_type,
        tags: input.tags,
        date_from: input.from,
        date_to: input.to,
        limit: limit_arg(limit),
        offset: input.offset.map(|n| n.to_string()),
    }
}

pub async fn run(input: ListInput, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let req = list_args(input, flags.limit).validate(ctx.service.defaults())?;
    let page = ctx.service.list_tasks(&req).await?;
    output(&page, flags.format)
}

#[cfg(test)]
mod tests {
    use jot_core::enums::TaskStatus;
    use jot_core::requests::{PageRequest, RequestDefaults};

    use super::{ListInput, list_args};

    #[test]
    fn flags_map_onto_list_arguments() {
        let input = ListInput {
            status: Some("active".into()),
            task_type: None,
            tags: vec!["auth".into()],
            from: Some("2025-01-01".into()),
            to: None,
            offset: Some(20),
        };
        let req = list_args(input, Some(10))
            .validate(&RequestDefaults::default())
            .expect("valid list args");
        assert_eq!(req.filter.status, Some(TaskStatus::Active));
        assert_eq!(req.filter.tags, vec!["auth".to_string()]);
        assert!(req.filter.range.from.is_some());
        assert_eq!(req.page, PageRequest { offset: 20, limit: 10 });
    }
}
