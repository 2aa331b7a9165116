use std::io::Write;

use anyhow::{Context as _, Result, bail};
use chrono::{TimeDelta, TimeZone};
use tp_api::{Backend, TaskUpdateInput};
use tp_core::{Clock, TaskStatus, parse_duration};

use crate::Context;
use crate::cli::PomodoroArgs;
use crate::pomodoro::{Timer, announce_done};

/// Runs a pomodoro. With `--continue` it counts from the start of the
/// running event and pauses that task when time is up.
pub async fn run<W, B, C, Tz>(
    writer: &mut W,
    ctx: &Context<'_, B, C, Tz>,
    args: &PomodoroArgs,
) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let length = parse_duration(&args.duration)?;
    if length <= TimeDelta::zero() {
        bail!("pomodoro length must be positive, got: {}", args.duration);
    }

    if !args.continue_running {
        Timer::new(length).run(writer, ctx.clock, ctx.now()).await?;
        if ctx.announce {
            announce_done().await;
        }
        return Ok(());
    }

    let me = ctx
        .backend
        .me_with_task_event()
        .await
        .context("failed to load running task")?;
    let (Some(task), Some(event)) = (me.running_task, me.running_event) else {
        bail!("no running task");
    };
    let started = event.start_at.with_timezone(&ctx.tz).naive_local();
    writeln!(
        writer,
        "continue pomo - task: {}; event start at: {}",
        task.name,
        started.format("%H:%M:%S")
    )?;
    if ctx.now() - event.start_at > length {
        bail!("the running event is already longer than the pomodoro");
    }

    Timer::new(length)
        .run(writer, ctx.clock, event.start_at)
        .await?;
    if ctx.announce {
        announce_done().await;
    }
    let task = ctx
        .backend
        .update_task(task.id, &TaskUpdateInput::status(TaskStatus::Paused))
        .await
        .with_context(|| format!("failed to pause task {}", task.id))?;
    writeln!(writer, "task paused: {}", task.name)?;
    Ok(())
}
