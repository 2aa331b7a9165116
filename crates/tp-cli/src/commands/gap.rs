//! Cutting a gap out of the running event.

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use chrono::{TimeDelta, TimeZone};
use tp_api::{Backend, EventUpdateInput, Patch, TaskStartInput};
use tp_core::{Clock, format_duration, parse_duration};

use crate::Context;
use crate::cli::GapArgs;
use crate::commands::running_event;

/// Ends the running event `duration` ago and starts a fresh event on the
/// same task, leaving the gap untracked.
pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &GapArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let gap = parse_duration(&args.duration)?;
    if gap <= TimeDelta::zero() {
        bail!("gap must be positive, got: {}", args.duration);
    }

    let event = running_event(ctx.backend).await?;
    let now = ctx.now();
    let end_at = now - gap;
    if end_at < event.start_at {
        bail!(
            "gap of {} is longer than the running event",
            format_duration(gap, true)
        );
    }

    let input = EventUpdateInput {
        end_at: Patch::Set(end_at),
        description: Patch::from_option(args.description.clone()),
        ..EventUpdateInput::default()
    };
    ctx.backend
        .update_event(event.id, &input)
        .await
        .with_context(|| format!("failed to end event {}", event.id))?;

    let started = ctx
        .backend
        .start_task(
            event.task_id,
            &TaskStartInput {
                start_at: Some(now),
                description: None,
            },
        )
        .await
        .with_context(|| format!("failed to restart task {}", event.task_id))?;
    writeln!(
        writer,
        "hole added: {}; started new event for task: {}",
        format_duration(gap, true),
        started.task.name
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{FakeBackend, at, context, event, output, task};
    use tp_core::{FixedClock, TaskStatus};

    fn backend() -> FakeBackend {
        FakeBackend::new(
            vec![task(3, "write", TaskStatus::Doing)],
            vec![event(8, 3, 0, None)],
        )
    }

    fn args(duration: &str, description: Option<&str>) -> GapArgs {
        GapArgs {
            duration: duration.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn ends_event_early_and_restarts_task() {
        let backend = backend();
        let clock = FixedClock(at(60));
        let mut out = Vec::new();

        run(&mut out, &context(&backend, &clock), &args("20m", Some("before lunch")))
            .await
            .unwrap();

        assert_eq!(
            output(out),
            "hole added: 20m; started new event for task: write\n"
        );
        let ended = backend.event(8).unwrap();
        assert_eq!(ended.end_at, Some(at(40)));
        assert_eq!(ended.description.as_deref(), Some("before lunch"));
        let resumed = backend.event(101).unwrap();
        assert_eq!(resumed.task_id, ended.task_id);
        assert_eq!(resumed.start_at, at(60));
        assert!(resumed.is_running());
    }

    #[tokio::test]
    async fn gap_longer_than_event_is_rejected() {
        let backend = backend();
        let clock = FixedClock(at(10));

        let err = run(&mut Vec::new(), &context(&backend, &clock), &args("15m", None))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("longer than the running event"));
        assert_eq!(backend.calls(), vec!["query_running_event"]);
    }

    #[tokio::test]
    async fn invalid_duration_sends_nothing() {
        let backend = backend();
        let clock = FixedClock(at(10));

        assert!(run(&mut Vec::new(), &context(&backend, &clock), &args("soon", None))
            .await
            .is_err());
        assert!(run(&mut Vec::new(), &context(&backend, &clock), &args("-5m", None))
            .await
            .is_err());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn idle_user_has_no_gap_to_cut() {
        let backend = FakeBackend::new(Vec::new(), Vec::new());
        let clock = FixedClock(at(10));

        let err = run(&mut Vec::new(), &context(&backend, &clock), &args("5m", None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no running event");
    }
}
