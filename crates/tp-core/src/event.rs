//! Events: tracked time intervals belonging to a task.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, TaskId};

/// One tracked interval of work on a task.
///
/// An event without `end_at` is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    pub start_at: DateTime<Utc>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    pub const fn is_running(&self) -> bool {
        self.end_at.is_none()
    }

    /// Elapsed time of the event, measuring open events up to `now`.
    pub fn duration(&self, now: DateTime<Utc>) -> TimeDelta {
        self.end_at.unwrap_or(now) - self.start_at
    }
}
