//! Finishing a task.

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use chrono::TimeZone;
use tp_api::{Backend, EventUpdateInput, Patch, TaskUpdateInput};
use tp_core::{Clock, TaskId, TaskStatus};

use crate::Context;
use crate::cli::DoneArgs;

/// Splits `[task-id] [desc]`, where a lone non-numeric argument is the
/// description.
fn parse_args(args: &DoneArgs) -> Result<(Option<TaskId>, Option<String>)> {
    let Some(first) = &args.task else {
        return Ok((None, None));
    };
    match first.parse::<TaskId>() {
        Ok(id) => Ok((Some(id), args.description.clone())),
        Err(_) if args.description.is_none() => Ok((None, Some(first.clone()))),
        Err(err) => bail!("expected a task id before the description: {err}"),
    }
}

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &DoneArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let (task_id, description) = parse_args(args)?;
    let task_id = match task_id {
        Some(id) => id,
        None => {
            let user = ctx.backend.me().await.context("failed to load user")?;
            user.running_task_id
                .context("no running task, a task id must be given")?
        }
    };

    let task = ctx
        .backend
        .update_task(task_id, &TaskUpdateInput::status(TaskStatus::Done))
        .await
        .with_context(|| format!("failed to finish task {task_id}"))?;
    writeln!(writer, "task(id={}) successfully done: {}", task.id, task.name)?;

    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return Ok(());
    };
    let event = ctx
        .backend
        .query_task_last_event(task_id)
        .await
        .context("failed to load the task's last event")?
        .with_context(|| format!("cannot find event for task(id={task_id})"))?;
    let input = EventUpdateInput {
        description: Patch::Set(description),
        ..EventUpdateInput::default()
    };
    let event = ctx
        .backend
        .update_event(event.id, &input)
        .await
        .with_context(|| format!("failed to update event {}", event.id))?;
    writeln!(
        writer,
        "event(id={}) updated desc: {}",
        event.id,
        event.description.as_deref().unwrap_or_default()
    )?;
    Ok(())
}
