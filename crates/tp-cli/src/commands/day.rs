//! Daily event log with a per-task summary.

use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use tp_api::Backend;
use tp_core::{Clock, Interval, format_duration, parse_day_offset, summarize};

use crate::Context;
use crate::cli::DayArgs;
use crate::output::EventFormatter;

/// Days relative to today named by `day`: `p<n>`, `n<n>` or `YYYY-MM-DD`.
fn day_offset(day: Option<&str>, today: NaiveDate) -> Result<i64> {
    let Some(day) = day else {
        return Ok(0);
    };
    if day.starts_with(['p', 'n']) {
        return Ok(parse_day_offset(day)?);
    }
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .with_context(|| format!("expected p<n>, n<n> or YYYY-MM-DD, got: {day}"))?;
    Ok((date - today).num_days())
}

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &DayArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let today = ctx.now().with_timezone(&ctx.tz).date_naive();
    let offset = day_offset(args.day.as_deref(), today)?;
    let since = ctx.resolver().start_of_day(offset)?.with_timezone(&Utc);

    let page = ctx
        .backend
        .query_events(since, 1)
        .await
        .context("failed to load events")?;
    if page.events.is_empty() {
        writeln!(writer, "no events")?;
        return Ok(());
    }

    let task_name = |id| page.task(id).map_or("<unknown task>", |task| task.name.as_str());
    let formatter = EventFormatter {
        duration_until: Some(ctx.now()),
        ..EventFormatter::default()
    };
    for event in &page.events {
        formatter.write(writer, event, &ctx.tz)?;
        writeln!(writer, "\t-- {}", task_name(event.task_id))?;
    }

    let intervals: Vec<Interval> = page.events.iter().map(Interval::from).collect();
    let summary = summarize(&intervals, ctx.clock);
    writeln!(writer)?;
    writeln!(writer, "\t*** Summary ***")?;
    for (task_id, spent) in summary.ranked() {
        writeln!(
            writer,
            "[{task_id}]{}: {}",
            task_name(task_id),
            format_duration(spent, true)
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "Total Spent: {}", format_duration(summary.total(), true))?;
    Ok(())
}
