use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::Backend;
use tp_core::Clock;

use crate::Context;
use crate::cli::OptionalTaskArgs;
use crate::commands::running_event;
use crate::output::{EventFormatter, write_task};

/// Shows a task followed by its events, newest first.
pub async fn run<W, B, C, Tz>(
    writer: &mut W,
    ctx: &Context<'_, B, C, Tz>,
    args: &OptionalTaskArgs,
) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let task_id = match args.task_id {
        Some(id) => id,
        None => running_event(ctx.backend).await?.task_id,
    };
    let found = ctx
        .backend
        .get_task_events(task_id)
        .await
        .with_context(|| format!("failed to load task {task_id}"))?;

    write_task(writer, &found.task, &ctx.tz)?;
    let formatter = EventFormatter {
        prefix: "\t",
        with_date: true,
        duration_until: Some(ctx.now()),
    };
    for event in &found.events {
        formatter.write(writer, event, &ctx.tz)?;
    }
    Ok(())
}
