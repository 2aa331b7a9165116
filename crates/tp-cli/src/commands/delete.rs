//! Deleting, removing and restoring tasks.

use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::Backend;
use tp_core::{Clock, TaskId};

use crate::Context;
use crate::cli::{OptionalTaskArgs, TaskArgs};
use crate::commands::running_event;

/// Soft delete (restorable) or permanent removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Delete,
    Remove,
}

impl Mode {
    pub(crate) const fn verb(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Remove => "remove",
        }
    }
}

async fn target_task<W, B>(writer: &mut W, backend: &B, task_id: Option<TaskId>, mode: Mode) -> Result<TaskId>
where
    W: Write,
    B: Backend,
{
    if let Some(id) = task_id {
        return Ok(id);
    }
    writeln!(
        writer,
        "taskID not provided, would {} the current running task",
        mode.verb()
    )?;
    Ok(running_event(backend).await?.task_id)
}

pub async fn run<W, B, C, Tz>(
    writer: &mut W,
    ctx: &Context<'_, B, C, Tz>,
    args: &OptionalTaskArgs,
    mode: Mode,
) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let task_id = target_task(writer, ctx.backend, args.task_id, mode).await?;
    let task = match mode {
        Mode::Delete => ctx.backend.delete_task(task_id).await,
        Mode::Remove => ctx.backend.remove_task(task_id).await,
    }
    .with_context(|| format!("failed to {} task {task_id}", mode.verb()))?;
    writeln!(
        writer,
        "task(id={}) {}d successfully: {}",
        task.id,
        mode.verb(),
        task.name
    )?;
    Ok(())
}

pub async fn undelete<W, B, C, Tz>(
    writer: &mut W,
    ctx: &Context<'_, B, C, Tz>,
    args: &TaskArgs,
) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let task = ctx
        .backend
        .undelete_task(args.task_id)
        .await
        .with_context(|| format!("failed to undelete task {}", args.task_id))?;
    writeln!(writer, "task(id={}) undeleted successfully: {}", task.id, task.name)?;
    Ok(())
}
