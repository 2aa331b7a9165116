//! Pomodoro countdown with a terminal progress bar.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use tp_core::Clock;

/// Default pomodoro length in minutes.
pub const DEFAULT_MINUTES: i64 = 25;

const BAR_WIDTH: i64 = 25;

/// A countdown that redraws its progress once per tick.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    length: TimeDelta,
    tick: Duration,
}

impl Timer {
    pub const fn new(length: TimeDelta) -> Self {
        Self {
            length,
            tick: Duration::from_secs(1),
        }
    }

    /// Runs until `length` has passed since `started_at`, then prints `Done :)`.
    pub async fn run<W: Write, C: Clock>(
        &self,
        writer: &mut W,
        clock: &C,
        started_at: DateTime<Utc>,
    ) -> Result<()> {
        tracing::debug!(length = %self.length, %started_at, "pomodoro started");
        loop {
            tokio::time::sleep(self.tick).await;
            let elapsed = (clock.now() - started_at).min(self.length);
            write!(writer, "\r{}", progress(elapsed, self.length))?;
            writer.flush()?;
            if elapsed >= self.length {
                break;
            }
        }
        writeln!(writer, "\nDone :)")?;
        Ok(())
    }
}

/// `MM:SS/MM:SS |***      |` for `elapsed` out of `length`.
fn progress(elapsed: TimeDelta, length: TimeDelta) -> String {
    let total_ms = length.num_milliseconds().max(1);
    let filled = (elapsed.num_milliseconds() * BAR_WIDTH / total_ms).clamp(0, BAR_WIDTH);
    let filled = usize::try_from(filled).unwrap_or(0);
    let width = usize::try_from(BAR_WIDTH).unwrap_or(0);
    format!(
        "{}/{} |{}{}|",
        mm_ss(elapsed),
        mm_ss(length),
        "*".repeat(filled),
        " ".repeat(width - filled)
    )
}

fn mm_ss(d: TimeDelta) -> String {
    format!("{:02}:{:02}", d.num_minutes(), d.num_seconds() % 60)
}

/// Announces the end of a pomodoro with `say` where it exists.
///
/// Failure to speak is ignored.
pub async fn announce_done() {
    match tokio::process::Command::new("say")
        .arg("the pomodoro is done")
        .status()
        .await
    {
        Ok(status) => tracing::debug!(%status, "announced pomodoro end"),
        Err(err) => tracing::debug!(error = %err, "no speech synthesizer available"),
    }
}
