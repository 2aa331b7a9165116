//! Request inputs and response shapes exchanged with the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tp_core::{Event, EventId, Task, TaskId, TaskStatus, UserId};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "runningTaskID")]
    pub running_task_id: Option<TaskId>,
    #[serde(default, rename = "runningEventID")]
    pub running_event_id: Option<EventId>,
}

/// Result of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// The user together with whatever is running right now.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub running_task: Option<Task>,
    #[serde(default)]
    pub running_event: Option<Event>,
}

/// A task with its events, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskWithEvents {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Events in a time window plus the tasks they belong to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl EventsPage {
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}

/// Outcome of starting a task.
#[derive(Debug, Clone, Deserialize)]
pub struct StartedTask {
    pub task: Task,
    #[serde(default)]
    pub event: Option<Event>,
}

/// A field in an update input.
///
/// `Keep` leaves the field out of the request, `Clear` sends `null`, and
/// `Set` sends the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// `Set` for `Some`, `Keep` for `None`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Keep, Self::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Keep | Self::Clear => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginInput<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Filter for listing tasks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryTaskInput {
    pub status: Vec<TaskStatus>,
}

/// Fields for a new task.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Changes to an existing task.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub due_date: Patch<String>,
}

impl TaskUpdateInput {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Parameters for starting work on a task.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStartInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Changes to an existing event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdateInput {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub end_at: Patch<DateTime<Utc>>,
    #[serde(rename = "taskID", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
}

impl EventUpdateInput {
    /// Whether the input would change nothing.
    pub const fn is_empty(&self) -> bool {
        self.description.is_keep()
            && self.start_at.is_none()
            && self.end_at.is_keep()
            && self.task_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn event_update_omits_untouched_fields() {
        let input = EventUpdateInput {
            end_at: Patch::Set(Utc.with_ymd_and_hms(2025, 1, 29, 10, 0, 0).unwrap()),
            ..EventUpdateInput::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"endAt": "2025-01-29T10:00:00Z"}));
    }

    #[test]
    fn patch_clear_sends_null() {
        let input = EventUpdateInput {
            description: Patch::Clear,
            task_id: Some(TaskId::new(4)),
            ..EventUpdateInput::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"description": null, "taskID": 4}));
    }

    #[test]
    fn empty_event_update_is_detected() {
        assert!(EventUpdateInput::default().is_empty());
        let input = EventUpdateInput {
            start_at: Some(Utc::now()),
            ..EventUpdateInput::default()
        };
        assert!(!input.is_empty());
    }

    #[test]
    fn task_update_status_only() {
        let value = serde_json::to_value(TaskUpdateInput::status(TaskStatus::Paused)).unwrap();
        assert_eq!(value, json!({"status": "PAUSED"}));
    }

    #[test]
    fn me_flattens_user_fields() {
        let me: Me = serde_json::from_value(json!({
            "id": 1,
            "email": "ada@example.com",
            "name": "Ada",
            "runningTaskID": 12,
            "runningEventID": null,
            "runningTask": null,
            "runningEvent": null
        }))
        .unwrap();
        assert_eq!(me.user.email, "ada@example.com");
        assert_eq!(me.user.running_task_id, Some(TaskId::new(12)));
        assert!(me.running_task.is_none());
    }
}
