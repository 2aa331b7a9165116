use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::{Backend, TaskUpdateInput};
use tp_core::{Clock, TaskStatus};

use crate::Context;

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let user = ctx.backend.me().await.context("failed to load user")?;
    let task_id = user.running_task_id.context("no running task")?;
    let task = ctx
        .backend
        .update_task(task_id, &TaskUpdateInput::status(TaskStatus::Paused))
        .await
        .with_context(|| format!("failed to pause task {task_id}"))?;
    writeln!(writer, "task(id={}) paused: {}", task.id, task.name)?;
    Ok(())
}
