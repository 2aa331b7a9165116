//! Current user and running work.

use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::Backend;
use tp_core::Clock;

use crate::Context;
use crate::cli::MyArgs;
use crate::output::{EventFormatter, write_task};

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &MyArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let me = ctx
        .backend
        .me_with_task_event()
        .await
        .context("failed to load running task")?;

    if args.name_only {
        // Nothing at all when idle, so shell prompts stay clean.
        if let Some(task) = &me.running_task {
            writeln!(writer, "{}", task.name)?;
        }
        return Ok(());
    }

    let name = me.user.name.as_deref().unwrap_or_default();
    writeln!(writer, "{name} - {}", me.user.email)?;
    let Some(task) = &me.running_task else {
        writeln!(writer, "no running task")?;
        return Ok(());
    };

    writeln!(writer, "\tCurrent task:")?;
    write_task(writer, task, &ctx.tz)?;
    if let Some(event) = &me.running_event {
        writeln!(writer, "\tCurrent event:")?;
        let formatter = EventFormatter {
            duration_until: Some(ctx.now()),
            ..EventFormatter::default()
        };
        formatter.write(writer, event, &ctx.tz)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{FakeBackend, at, context, event, output, task};
    use tp_core::{FixedClock, TaskStatus};

    #[tokio::test]
    async fn shows_running_task_and_event() {
        let backend = FakeBackend::new(
            vec![task(3, "write report", TaskStatus::Doing)],
            vec![event(7, 3, 0, None)],
        );
        let clock = FixedClock(at(42));
        let mut out = Vec::new();

        run(&mut out, &context(&backend, &clock), &MyArgs { name_only: false })
            .await
            .unwrap();

        assert_eq!(
            output(out),
            "Ada - ada@example.com\n\tCurrent task:\n3\tDOING\twrite report\t\n\tCurrent event:\n[7]09:00:00 - doing (42m)\n"
        );
    }

    #[tokio::test]
    async fn reports_idle_user() {
        let backend = FakeBackend::default();
        let clock = FixedClock(at(0));
        let mut out = Vec::new();

        run(&mut out, &context(&backend, &clock), &MyArgs { name_only: false })
            .await
            .unwrap();

        insta::assert_snapshot!(output(out), @r"
        Ada - ada@example.com
        no running task
        ");
    }

    #[tokio::test]
    async fn name_only_prints_just_the_task_name() {
        let backend = FakeBackend::new(
            vec![task(3, "write report", TaskStatus::Doing)],
            vec![event(7, 3, 0, None)],
        );
        let clock = FixedClock(at(5));
        let mut out = Vec::new();

        run(&mut out, &context(&backend, &clock), &MyArgs { name_only: true })
            .await
            .unwrap();

        assert_eq!(output(out), "write report\n");
    }

    #[tokio::test]
    async fn name_only_is_silent_when_idle() {
        let backend = FakeBackend::default();
        let clock = FixedClock(at(5));
        let mut out = Vec::new();

        run(&mut out, &context(&backend, &clock), &MyArgs { name_only: true })
            .await
            .unwrap();

        assert!(out.is_empty());
    }
}
