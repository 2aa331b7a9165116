//! CLI subcommand implementations.

use anyhow::{Context as _, Result};
use tp_api::Backend;
use tp_core::Event;

pub mod add;
pub mod day;
pub mod delete;
pub mod delete_event;
pub mod done;
pub mod gap;
pub mod list;
pub mod login;
pub mod logout;
pub mod me;
pub mod pause;
pub mod pomodoro;
pub mod start;
pub mod task;
pub mod update;
pub mod update_event;

#[cfg(test)]
pub(crate) mod testing;

/// The user's running event; an error when nothing is running.
pub(crate) async fn running_event<B: Backend>(backend: &B) -> Result<Event> {
    backend
        .query_running_event()
        .await
        .context("failed to query running event")?
        .context("no running event")
}
