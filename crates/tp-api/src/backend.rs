//! The operations the CLI needs from the backend.

use chrono::{DateTime, Utc};
use tp_core::{Event, EventId, Task, TaskId, TaskStatus};

use crate::ApiError;
use crate::model::{
    AuthPayload, EventUpdateInput, EventsPage, Me, StartedTask, TaskCreateInput, TaskStartInput,
    TaskUpdateInput, TaskWithEvents, User,
};

/// Remote task and event store.
///
/// [`Client`](crate::Client) implements this over HTTP; commands are written
/// against the trait so they can be exercised with an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn me(&self) -> Result<User, ApiError>;

    /// The user plus the running task and event, if any.
    async fn me_with_task_event(&self) -> Result<Me, ApiError>;

    /// Tasks whose status is one of `statuses`. An empty slice lets the
    /// backend apply its default filter.
    async fn query_tasks(&self, statuses: &[TaskStatus]) -> Result<Vec<Task>, ApiError>;

    async fn get_task_events(&self, id: TaskId) -> Result<TaskWithEvents, ApiError>;

    async fn query_task_last_event(&self, id: TaskId) -> Result<Option<Event>, ApiError>;

    async fn create_task(&self, input: &TaskCreateInput) -> Result<Task, ApiError>;

    async fn update_task(&self, id: TaskId, input: &TaskUpdateInput) -> Result<Task, ApiError>;

    /// Soft-deletes a task.
    async fn delete_task(&self, id: TaskId) -> Result<Task, ApiError>;

    /// Removes a task permanently.
    async fn remove_task(&self, id: TaskId) -> Result<Task, ApiError>;

    async fn undelete_task(&self, id: TaskId) -> Result<Task, ApiError>;

    /// Starts a task, opening a new event and closing whatever was running.
    async fn start_task(&self, id: TaskId, input: &TaskStartInput)
    -> Result<StartedTask, ApiError>;

    async fn get_event(&self, id: EventId) -> Result<Event, ApiError>;

    async fn query_running_event(&self) -> Result<Option<Event>, ApiError>;

    /// Most recent event starting within three days of `since`.
    async fn query_latest_event(&self, since: DateTime<Utc>) -> Result<Option<Event>, ApiError>;

    /// Events starting within `days` days of `since`, with their tasks.
    async fn query_events(&self, since: DateTime<Utc>, days: u32) -> Result<EventsPage, ApiError>;

    async fn update_event(&self, id: EventId, input: &EventUpdateInput)
    -> Result<Event, ApiError>;

    /// Soft-deletes an event.
    async fn delete_event(&self, id: EventId) -> Result<Event, ApiError>;

    /// Removes an event permanently.
    async fn remove_event(&self, id: EventId) -> Result<Event, ApiError>;
}
