//! In-memory backend and clocks for command tests.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tp_api::{
    ApiError, AuthPayload, Backend, EventUpdateInput, EventsPage, Me, Patch, StartedTask,
    TaskCreateInput, TaskStartInput, TaskUpdateInput, TaskWithEvents, User,
};
use tp_core::{Clock, DayShift, Event, EventId, FixedClock, Task, TaskId, TaskStatus, UserId};

use crate::Context;

/// 2025-01-29 09:00:00 UTC.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 29, 9, 0, 0).unwrap()
}

pub fn at(minutes: i64) -> DateTime<Utc> {
    t0() + TimeDelta::minutes(minutes)
}

pub fn task(id: i64, name: &str, status: TaskStatus) -> Task {
    Task {
        id: TaskId::new(id),
        name: name.to_string(),
        description: None,
        status,
        created_at: t0(),
        updated_at: t0(),
        due_date: None,
    }
}

/// Event on `task_id` spanning minutes `start..end` after [`t0`].
pub fn event(id: i64, task_id: i64, start: i64, end: Option<i64>) -> Event {
    Event {
        id: EventId::new(id),
        task_id: TaskId::new(task_id),
        start_at: at(start),
        end_at: end.map(at),
        description: None,
    }
}

/// Advances by a fixed step every time it is read.
pub struct SteppingClock {
    now: Cell<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    pub const fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.now.get() + self.step;
        self.now.set(now);
        now
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
    /// Every backend call, in order.
    pub calls: Vec<String>,
    pub task_updates: Vec<(TaskId, TaskUpdateInput)>,
    pub event_updates: Vec<(EventId, EventUpdateInput)>,
    pub starts: Vec<(TaskId, TaskStartInput)>,
    /// Answer every authenticated call with "access denied".
    pub deny: bool,
    next_id: i64,
}

/// Backend that keeps tasks and events in memory and records every call.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub state: RefCell<State>,
}

impl FakeBackend {
    pub fn new(tasks: Vec<Task>, events: Vec<Event>) -> Self {
        Self {
            state: RefCell::new(State {
                tasks,
                events,
                next_id: 100,
                ..State::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn task(&self, id: i64) -> Option<Task> {
        self.state
            .borrow()
            .tasks
            .iter()
            .find(|task| task.id == TaskId::new(id))
            .cloned()
    }

    pub fn event(&self, id: i64) -> Option<Event> {
        self.state
            .borrow()
            .events
            .iter()
            .find(|event| event.id == EventId::new(id))
            .cloned()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if state.deny {
            return Err(ApiError::AccessDenied);
        }
        Ok(())
    }

    fn running_event(&self) -> Option<Event> {
        self.state
            .borrow()
            .events
            .iter()
            .find(|event| event.is_running())
            .cloned()
    }

    fn find_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.state
            .borrow()
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(ApiError::NotFound {
                kind: "task",
                id: id.get(),
            })
    }

    fn find_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.state
            .borrow()
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or(ApiError::NotFound {
                kind: "event",
                id: id.get(),
            })
    }

    fn user(&self) -> User {
        let running = self.running_event();
        User {
            id: UserId::new(1),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            running_task_id: running.as_ref().map(|event| event.task_id),
            running_event_id: running.map(|event| event.id),
        }
    }

    fn next_id(&self) -> i64 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

fn apply<T: Clone>(patch: &Patch<T>, field: &mut Option<T>) {
    match patch {
        Patch::Keep => {}
        Patch::Clear => *field = None,
        Patch::Set(value) => *field = Some(value.clone()),
    }
}

impl Backend for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        self.state.borrow_mut().calls.push(format!("login {email}"));
        if password != "secret" {
            return Err(ApiError::Graphql {
                message: "invalid email or password".to_string(),
            });
        }
        Ok(AuthPayload {
            token: "tok-new".to_string(),
            user: User {
                email: email.to_string(),
                ..self.user()
            },
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout".to_string())
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.record("me".to_string())?;
        Ok(self.user())
    }

    async fn me_with_task_event(&self) -> Result<Me, ApiError> {
        self.record("me_with_task_event".to_string())?;
        let running_event = self.running_event();
        let running_task = match &running_event {
            Some(event) => Some(self.find_task(event.task_id)?),
            None => None,
        };
        Ok(Me {
            user: self.user(),
            running_task,
            running_event,
        })
    }

    async fn query_tasks(&self, statuses: &[TaskStatus]) -> Result<Vec<Task>, ApiError> {
        self.record(format!("query_tasks {statuses:?}"))?;
        Ok(self
            .state
            .borrow()
            .tasks
            .iter()
            .filter(|task| statuses.is_empty() || statuses.contains(&task.status))
            .cloned()
            .collect())
    }

    async fn get_task_events(&self, id: TaskId) -> Result<TaskWithEvents, ApiError> {
        self.record(format!("get_task_events {id}"))?;
        let task = self.find_task(id)?;
        let mut events: Vec<Event> = self
            .state
            .borrow()
            .events
            .iter()
            .filter(|event| event.task_id == id)
            .cloned()
            .collect();
        events.sort_by_key(|event| std::cmp::Reverse(event.start_at));
        Ok(TaskWithEvents { task, events })
    }

    async fn query_task_last_event(&self, id: TaskId) -> Result<Option<Event>, ApiError> {
        self.record(format!("query_task_last_event {id}"))?;
        Ok(self
            .state
            .borrow()
            .events
            .iter()
            .filter(|event| event.task_id == id)
            .max_by_key(|event| event.start_at)
            .cloned())
    }

    async fn create_task(&self, input: &TaskCreateInput) -> Result<Task, ApiError> {
        self.record(format!("create_task {}", input.name))?;
        let mut created = task(self.next_id(), &input.name, TaskStatus::NotStarted);
        created.description.clone_from(&input.description);
        self.state.borrow_mut().tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, input: &TaskUpdateInput) -> Result<Task, ApiError> {
        self.record(format!("update_task {id}"))?;
        let mut state = self.state.borrow_mut();
        state.task_updates.push((id, input.clone()));
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ApiError::NotFound {
                kind: "task",
                id: id.get(),
            })?;
        if let Some(name) = &input.name {
            task.name.clone_from(name);
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        apply(&input.description, &mut task.description);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.record(format!("delete_task {id}"))?;
        self.find_task(id)
    }

    async fn remove_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.record(format!("remove_task {id}"))?;
        let task = self.find_task(id)?;
        self.state.borrow_mut().tasks.retain(|task| task.id != id);
        Ok(task)
    }

    async fn undelete_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.record(format!("undelete_task {id}"))?;
        self.find_task(id)
    }

    async fn start_task(&self, id: TaskId, input: &TaskStartInput) -> Result<StartedTask, ApiError> {
        self.record(format!("start_task {id}"))?;
        self.find_task(id)?;
        let start = input.start_at.unwrap_or_else(t0);
        let event = Event {
            id: EventId::new(self.next_id()),
            task_id: id,
            start_at: start,
            end_at: None,
            description: input.description.clone(),
        };

        let mut state = self.state.borrow_mut();
        state.starts.push((id, input.clone()));
        for running in state.events.iter_mut().filter(|e| e.is_running()) {
            running.end_at = Some(start);
        }
        state.events.push(event.clone());
        for task in &mut state.tasks {
            if task.id == id {
                task.status = TaskStatus::Doing;
            } else if task.status == TaskStatus::Doing {
                task.status = TaskStatus::Paused;
            }
        }
        let task = state
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(ApiError::NotFound {
                kind: "task",
                id: id.get(),
            })?;
        Ok(StartedTask {
            task,
            event: Some(event),
        })
    }

    async fn get_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.record(format!("get_event {id}"))?;
        self.find_event(id)
    }

    async fn query_running_event(&self) -> Result<Option<Event>, ApiError> {
        self.record("query_running_event".to_string())?;
        Ok(self.running_event())
    }

    async fn query_latest_event(&self, since: DateTime<Utc>) -> Result<Option<Event>, ApiError> {
        self.record(format!("query_latest_event {since}"))?;
        Ok(self
            .state
            .borrow()
            .events
            .iter()
            .filter(|event| event.start_at >= since)
            .max_by_key(|event| event.start_at)
            .cloned())
    }

    async fn query_events(&self, since: DateTime<Utc>, days: u32) -> Result<EventsPage, ApiError> {
        self.record(format!("query_events {since} {days}"))?;
        let until = since + TimeDelta::days(i64::from(days));
        let state = self.state.borrow();
        let events: Vec<Event> = state
            .events
            .iter()
            .filter(|event| event.start_at >= since && event.start_at < until)
            .cloned()
            .collect();
        let tasks = state
            .tasks
            .iter()
            .filter(|task| events.iter().any(|event| event.task_id == task.id))
            .cloned()
            .collect();
        Ok(EventsPage { events, tasks })
    }

    async fn update_event(&self, id: EventId, input: &EventUpdateInput) -> Result<Event, ApiError> {
        self.record(format!("update_event {id}"))?;
        let mut state = self.state.borrow_mut();
        state.event_updates.push((id, input.clone()));
        let event = state
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(ApiError::NotFound {
                kind: "event",
                id: id.get(),
            })?;
        if let Some(start) = input.start_at {
            event.start_at = start;
        }
        if let Some(task_id) = input.task_id {
            event.task_id = task_id;
        }
        apply(&input.end_at, &mut event.end_at);
        apply(&input.description, &mut event.description);
        Ok(event.clone())
    }

    async fn delete_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.record(format!("delete_event {id}"))?;
        self.find_event(id)
    }

    async fn remove_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.record(format!("remove_event {id}"))?;
        let event = self.find_event(id)?;
        self.state.borrow_mut().events.retain(|event| event.id != id);
        Ok(event)
    }
}

/// Context rendering in UTC with a frozen clock.
pub fn context<'a>(
    backend: &'a FakeBackend,
    clock: &'a FixedClock,
) -> Context<'a, FakeBackend, FixedClock, Utc> {
    Context::new(backend, clock, Utc, DayShift::Calendar).silent()
}

/// Captured command output as text.
pub fn output(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}
