//! Starting work on a task.

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use chrono::{TimeDelta, TimeZone};
use tp_api::{Backend, TaskCreateInput, TaskStartInput, TaskUpdateInput};
use tp_core::{Clock, TaskId, TaskStatus, parse_duration};

use crate::Context;
use crate::cli::StartArgs;
use crate::pomodoro::{self, DEFAULT_MINUTES, Timer};

/// How far back `start` without arguments looks for the last task.
const RESUME_WINDOW_DAYS: i64 = 2;

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &StartArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    // Parse before any request so a bad offset changes nothing.
    let offset = match &args.offset {
        Some(offset) => parse_duration(offset).context("invalid --offset")?,
        None => TimeDelta::zero(),
    };

    let task_id = resolve_task(ctx, args).await?;
    let input = TaskStartInput {
        start_at: Some(ctx.now() - offset),
        description: args.description.clone(),
    };
    let started = ctx
        .backend
        .start_task(task_id, &input)
        .await
        .with_context(|| format!("failed to start task {task_id}"))?;

    writeln!(
        writer,
        "task(id={}) started successfully: {}",
        started.task.id, started.task.name
    )?;
    if let Some(event) = &started.event {
        let start = event.start_at.with_timezone(&ctx.tz).naive_local();
        writeln!(
            writer,
            "\tevent(id={}) started successfully at: {}",
            event.id,
            start.format("%H:%M:%S")
        )?;
    }

    if args.pomodoro {
        Timer::new(TimeDelta::minutes(DEFAULT_MINUTES))
            .run(writer, ctx.clock, ctx.now())
            .await?;
        if ctx.announce {
            pomodoro::announce_done().await;
        }
        let task = ctx
            .backend
            .update_task(started.task.id, &TaskUpdateInput::status(TaskStatus::Paused))
            .await
            .context("failed to pause task after pomodoro")?;
        writeln!(writer, "task paused: {}", task.name)?;
    }
    Ok(())
}

/// Picks the task to start: the given id, a newly created task, or the task
/// of the latest recent event.
async fn resolve_task<B, C, Tz>(ctx: &Context<'_, B, C, Tz>, args: &StartArgs) -> Result<TaskId>
where
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let Some(arg) = &args.task else {
        let since = ctx.now() - TimeDelta::days(RESUME_WINDOW_DAYS);
        let latest = ctx
            .backend
            .query_latest_event(since)
            .await
            .context("failed to query recent events")?;
        return match latest {
            Some(event) => Ok(event.task_id),
            None => bail!("no task id given and no event in the last {RESUME_WINDOW_DAYS} days"),
        };
    };

    if arg.parse::<i64>().is_ok() {
        return Ok(arg.parse::<TaskId>()?);
    }

    let created = ctx
        .backend
        .create_task(&TaskCreateInput {
            name: arg.clone(),
            ..TaskCreateInput::default()
        })
        .await
        .context("failed to create task")?;
    tracing::info!(task_id = %created.id, "created task");
    Ok(created.id)
}
