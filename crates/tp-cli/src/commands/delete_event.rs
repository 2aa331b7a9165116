use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::TimeZone;
use tp_api::Backend;
use tp_core::Clock;

use crate::Context;
use crate::cli::OptionalEventArgs;
use crate::commands::delete::Mode;
use crate::commands::running_event;

/// Deletes or removes an event, defaulting to the running one.
pub async fn run<W, B, C, Tz>(
    writer: &mut W,
    ctx: &Context<'_, B, C, Tz>,
    args: &OptionalEventArgs,
    mode: Mode,
) -> Result<()>
where
    W: Write,
    B: Backend,
    C: Clock,
    Tz: TimeZone,
{
    let event_id = match args.event_id {
        Some(id) => id,
        None => {
            writeln!(writer, "eventID not provided, would use current running event")?;
            running_event(ctx.backend).await?.id
        }
    };

    let event = match mode {
        Mode::Delete => ctx.backend.delete_event(event_id).await,
        Mode::Remove => ctx.backend.remove_event(event_id).await,
    }
    .with_context(|| format!("failed to {} event {event_id}", mode.verb()))?;
    writeln!(writer, "event(id={}) {}d successfully", event.id, mode.verb())?;
    Ok(())
}
