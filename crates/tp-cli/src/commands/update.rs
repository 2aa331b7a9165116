use std::io::Write;

use anyhow::{Context as _, Result, bail};
use chrono::TimeZone;
use tp_api::{Backend, Patch, TaskUpdateInput};
use tp_core::{Clock, TaskStatus};

use crate::Context;
use crate::cli::UpdateArgs;

/// Turns a text flag into a patch: absent keeps, empty clears.
pub(crate) fn text_patch(value: Option<&str>) -> Patch<String> {
    match value {
        None => Patch::Keep,
        Some("") => Patch::Clear,
        Some(text) => Patch::Set(text.to_string()),
    }
}

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &UpdateArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let input = TaskUpdateInput {
        name: args.name.clone(),
        description: text_patch(args.desc.as_deref()),
        status: args.pause.then_some(TaskStatus::Paused),
        due_date: Patch::from_option(args.due.map(|due| due.to_string())),
    };
    if input.name.is_none()
        && input.description.is_keep()
        && input.status.is_none()
        && input.due_date.is_keep()
    {
        bail!("nothing to update, pass at least one of --name, --desc, --due or --pause");
    }

    let task = ctx
        .backend
        .update_task(args.task_id, &input)
        .await
        .with_context(|| format!("failed to update task {}", args.task_id))?;
    writeln!(writer, "task(id={}) successfully updated: {}", task.id, task.name)?;
    Ok(())
}
