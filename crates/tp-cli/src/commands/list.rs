use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::Backend;
use tp_core::Clock;

use crate::Context;
use crate::cli::ListArgs;
use crate::output::write_task;

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &ListArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    tracing::debug!(statuses = ?args.status, "listing tasks");
    let tasks = ctx
        .backend
        .query_tasks(&args.status)
        .await
        .context("failed to list tasks")?;

    for task in &tasks {
        write_task(writer, task, &ctx.tz)?;
    }
    Ok(())
}
