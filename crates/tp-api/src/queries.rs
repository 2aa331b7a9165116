//! GraphQL documents sent to the backend.

macro_rules! task_fields {
    () => {
        "id name description status createdAt updatedAt dueDate"
    };
}

macro_rules! event_fields {
    () => {
        "id taskID startAt endAt description"
    };
}

macro_rules! user_fields {
    () => {
        "id email name runningTaskID runningEventID"
    };
}

pub const LOGIN: &str = concat!(
    "mutation Login($input: LoginInput!) { login(input: $input) { token user { ",
    user_fields!(),
    " } } }"
);

pub const LOGOUT: &str = "mutation Logout { logout }";

pub const ME: &str = concat!("query Me { me { ", user_fields!(), " } }");

pub const ME_WITH_TASK_EVENT: &str = concat!(
    "query MeWithTaskEvent { me { ",
    user_fields!(),
    " runningTask { ",
    task_fields!(),
    " } runningEvent { ",
    event_fields!(),
    " } } }"
);

pub const RUNNING_EVENT: &str = concat!(
    "query RunningEvent { me { runningEvent { ",
    event_fields!(),
    " } } }"
);

pub const TASKS: &str = concat!(
    "query Tasks($input: QueryTaskInput!) { tasks(input: $input) { ",
    task_fields!(),
    " } }"
);

pub const TASK_EVENTS: &str = concat!(
    "query TaskEvents($id: ID!) { task(id: $id) { ",
    task_fields!(),
    " events { ",
    event_fields!(),
    " } } }"
);

pub const TASK_LAST_EVENT: &str = concat!(
    "query TaskLastEvent($id: ID!) { task(id: $id) { events(input: {limit: 1}) { ",
    event_fields!(),
    " } } }"
);

pub const TASK_CREATE: &str = concat!(
    "mutation TaskCreate($input: TaskCreateInput!) { taskCreate(input: $input) { ",
    task_fields!(),
    " } }"
);

pub const TASK_UPDATE: &str = concat!(
    "mutation TaskUpdate($id: ID!, $input: TaskUpdateInput!) { taskUpdate(id: $id, input: $input) { ",
    task_fields!(),
    " } }"
);

pub const TASK_DELETE: &str = concat!(
    "mutation TaskDelete($id: ID!) { taskDelete(id: $id) { ",
    task_fields!(),
    " } }"
);

pub const TASK_REMOVE: &str = concat!(
    "mutation TaskRemove($id: ID!) { taskRemove(id: $id) { ",
    task_fields!(),
    " } }"
);

pub const TASK_UNDELETE: &str = concat!(
    "mutation TaskUndelete($id: ID!) { taskUndelete(id: $id) { ",
    task_fields!(),
    " } }"
);

pub const TASK_START: &str = concat!(
    "mutation TaskStart($id: ID!, $input: TaskStartInput) { taskStart(id: $id, input: $input) { task { ",
    task_fields!(),
    " } event { ",
    event_fields!(),
    " } } }"
);

pub const EVENT: &str = concat!(
    "query Event($id: ID!) { event(id: $id) { ",
    event_fields!(),
    " } }"
);

pub const EVENTS: &str = concat!(
    "query Events($since: Time!, $days: Int!, $limit: Int) { events(since: $since, days: $days, limit: $limit) { events { ",
    event_fields!(),
    " } tasks { ",
    task_fields!(),
    " } } }"
);

pub const EVENT_UPDATE: &str = concat!(
    "mutation EventUpdate($id: ID!, $input: EventUpdateInput!) { eventUpdate(id: $id, input: $input) { ",
    event_fields!(),
    " } }"
);

pub const EVENT_DELETE: &str = concat!(
    "mutation EventDelete($id: ID!) { eventDelete(id: $id) { ",
    event_fields!(),
    " } }"
);

pub const EVENT_REMOVE: &str = concat!(
    "mutation EventRemove($id: ID!) { eventRemove(id: $id) { ",
    event_fields!(),
    " } }"
);
