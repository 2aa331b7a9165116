//! Editing an event's times, description or task.

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use chrono::{TimeZone, Utc};
use tp_api::{Backend, EventUpdateInput, Patch};
use tp_core::{Clock, parse_day_offset};

use crate::Context;
use crate::cli::UpdateEventArgs;
use crate::commands::running_event;
use crate::commands::update::text_patch;
use crate::output::EventFormatter;

pub async fn run<W, B, C, Tz>(
    writer: &mut W,
    ctx: &Context<'_, B, C, Tz>,
    args: &UpdateEventArgs,
) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let day_offset = match &args.offset {
        Some(offset) => parse_day_offset(offset)?,
        None => 0,
    };

    let event = match args.event_id {
        Some(id) => ctx
            .backend
            .get_event(id)
            .await
            .with_context(|| format!("failed to load event {id}"))?,
        None => running_event(ctx.backend).await?,
    };

    let resolver = ctx.resolver();
    let resolve = |token: Option<&str>, reference| {
        resolver
            .resolve(token.unwrap_or_default(), reference, day_offset)
            .map(|resolved| resolved.map(|at| at.with_timezone(&Utc)))
    };
    let start_at = resolve(args.start.as_deref(), Some(event.start_at)).context("invalid --start")?;
    let end_at = resolve(args.end.as_deref(), event.end_at).context("invalid --end")?;

    let input = EventUpdateInput {
        description: text_patch(args.desc.as_deref()),
        start_at,
        end_at: Patch::from_option(end_at),
        task_id: args.task,
    };
    if input.is_empty() {
        bail!("nothing to update, pass at least one of --start, --end, --desc or --task");
    }

    let new_start = start_at.unwrap_or(event.start_at);
    if let Some(new_end) = end_at.or(event.end_at) {
        if new_end < new_start {
            bail!("event would end ({new_end}) before it starts ({new_start})");
        }
    }

    let updated = ctx
        .backend
        .update_event(event.id, &input)
        .await
        .with_context(|| format!("failed to update event {}", event.id))?;
    writeln!(writer, "event successfully updated")?;
    let formatter = EventFormatter {
        with_date: true,
        ..EventFormatter::default()
    };
    formatter.write(writer, &updated, &ctx.tz)?;
    Ok(())
}
