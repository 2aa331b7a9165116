use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::{Backend, TaskCreateInput};
use tp_core::Clock;

use crate::Context;
use crate::cli::AddArgs;
use crate::output::write_task;

pub async fn run<W, B, C, Tz>(writer: &mut W, ctx: &Context<'_, B, C, Tz>, args: &AddArgs) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let input = TaskCreateInput {
        name: args.name.clone(),
        description: args.desc.clone().or_else(|| args.description.clone()),
        due_date: args.due.map(|due| due.to_string()),
    };
    let task = ctx
        .backend
        .create_task(&input)
        .await
        .context("failed to create task")?;
    write_task(writer, &task, &ctx.tz)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{FakeBackend, at, context, output};
    use chrono::NaiveDate;
    use tp_core::FixedClock;

    #[tokio::test]
    async fn creates_task_with_description_and_due_date() {
        let backend = FakeBackend::new(Vec::new(), Vec::new());
        let clock = FixedClock(at(0));
        let mut out = Vec::new();
        let args = AddArgs {
            name: "write report".to_string(),
            description: Some("quarterly".to_string()),
            desc: None,
            due: NaiveDate::from_ymd_opt(2025, 2, 3),
        };

        run(&mut out, &context(&backend, &clock), &args).await.unwrap();

        assert_eq!(output(out), "101\tNOT_STARTED\twrite report\t\n");
        let created = backend.task(101).unwrap();
        assert_eq!(created.description.as_deref(), Some("quarterly"));
    }
}
