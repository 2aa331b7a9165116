//! HTTP transport for the GraphQL API.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tp_core::{Event, EventId, Task, TaskId, TaskStatus};

use crate::backend::Backend;
use crate::model::{
    AuthPayload, EventUpdateInput, EventsPage, LoginInput, Me, QueryTaskInput, StartedTask,
    TaskCreateInput, TaskStartInput, TaskUpdateInput, TaskWithEvents, User,
};
use crate::{ApiError, queries};

/// Production GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.todopeer.com/query";

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The backend answers this message when the token is missing or expired.
const ACCESS_DENIED: &str = "access denied";

/// GraphQL API client.
///
/// Requests carry `Authorization: Bearer <token>` when the client was built
/// with a token. The client is cheap to clone; clones share the connection
/// pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client without credentials, suitable only for logging in.
    pub fn anonymous(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        Self::build(endpoint.into(), None)
    }

    /// Creates a client that authenticates with a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, if the
    /// endpoint is empty, or if the HTTP client fails to build.
    pub fn with_token(
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ApiError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        Self::build(endpoint.into(), Some(token.trim().to_string()))
    }

    fn build(endpoint: String, token: Option<String>) -> Result<Self, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::InvalidEndpoint);
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one GraphQL document and extracts the top-level `field` of `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &'static str,
        field: &'static str,
        variables: Value,
    ) -> Result<T, ApiError> {
        let mut request = self.http.post(&self.endpoint).json(&GraphqlRequest {
            query,
            variables: &variables,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let result = match request.send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => decode_response(status, &body, field),
                    Err(err) => Err(ApiError::Request(err)),
                }
            }
            Err(err) => Err(ApiError::Request(err)),
        };

        match &result {
            Ok(_) => tracing::debug!(field, "graphql request succeeded"),
            Err(err) => tracing::debug!(field, error = %err, "graphql request failed"),
        }
        result
    }
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'static str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Turns an HTTP response body into the requested field of `data`.
fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    field: &str,
) -> Result<T, ApiError> {
    let payload: GraphqlResponse = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(_) if !status.is_success() => {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }
        Err(err) => return Err(ApiError::InvalidResponse(err.to_string())),
    };

    if let Some(error) = payload.errors.into_iter().next() {
        return Err(if error.message == ACCESS_DENIED {
            ApiError::AccessDenied
        } else {
            ApiError::Graphql {
                message: error.message,
            }
        });
    }

    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let mut data = payload
        .data
        .ok_or_else(|| ApiError::InvalidResponse("missing data".to_string()))?;
    let value = data.get_mut(field).map(Value::take).unwrap_or(Value::Null);
    serde_json::from_value(value)
        .map_err(|err| ApiError::InvalidResponse(format!("{field}: {err}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunningEvent {
    #[serde(default)]
    running_event: Option<Event>,
}

#[derive(Debug, Deserialize)]
struct TaskEvents {
    #[serde(default)]
    events: Vec<Event>,
}

impl Backend for Client {
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let input = LoginInput { email, password };
        self.execute(queries::LOGIN, "login", json!({ "input": input }))
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let _: Option<bool> = self.execute(queries::LOGOUT, "logout", json!({})).await?;
        Ok(())
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.execute(queries::ME, "me", json!({})).await
    }

    async fn me_with_task_event(&self) -> Result<Me, ApiError> {
        self.execute(queries::ME_WITH_TASK_EVENT, "me", json!({}))
            .await
    }

    async fn query_tasks(&self, statuses: &[TaskStatus]) -> Result<Vec<Task>, ApiError> {
        let input = QueryTaskInput {
            status: statuses.to_vec(),
        };
        self.execute(queries::TASKS, "tasks", json!({ "input": input }))
            .await
    }

    async fn get_task_events(&self, id: TaskId) -> Result<TaskWithEvents, ApiError> {
        let task: Option<TaskWithEvents> = self
            .execute(queries::TASK_EVENTS, "task", json!({ "id": id }))
            .await?;
        task.ok_or(ApiError::NotFound {
            kind: "task",
            id: id.get(),
        })
    }

    async fn query_task_last_event(&self, id: TaskId) -> Result<Option<Event>, ApiError> {
        let task: Option<TaskEvents> = self
            .execute(queries::TASK_LAST_EVENT, "task", json!({ "id": id }))
            .await?;
        Ok(task.and_then(|task| task.events.into_iter().next()))
    }

    async fn create_task(&self, input: &TaskCreateInput) -> Result<Task, ApiError> {
        self.execute(queries::TASK_CREATE, "taskCreate", json!({ "input": input }))
            .await
    }

    async fn update_task(&self, id: TaskId, input: &TaskUpdateInput) -> Result<Task, ApiError> {
        self.execute(
            queries::TASK_UPDATE,
            "taskUpdate",
            json!({ "id": id, "input": input }),
        )
        .await
    }

    async fn delete_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.execute(queries::TASK_DELETE, "taskDelete", json!({ "id": id }))
            .await
    }

    async fn remove_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.execute(queries::TASK_REMOVE, "taskRemove", json!({ "id": id }))
            .await
    }

    async fn undelete_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.execute(queries::TASK_UNDELETE, "taskUndelete", json!({ "id": id }))
            .await
    }

    async fn start_task(&self, id: TaskId, input: &TaskStartInput) -> Result<StartedTask, ApiError> {
        self.execute(
            queries::TASK_START,
            "taskStart",
            json!({ "id": id, "input": input }),
        )
        .await
    }

    async fn get_event(&self, id: EventId) -> Result<Event, ApiError> {
        let event: Option<Event> = self
            .execute(queries::EVENT, "event", json!({ "id": id }))
            .await?;
        event.ok_or(ApiError::NotFound {
            kind: "event",
            id: id.get(),
        })
    }

    async fn query_running_event(&self) -> Result<Option<Event>, ApiError> {
        let me: RunningEvent = self
            .execute(queries::RUNNING_EVENT, "me", json!({}))
            .await?;
        Ok(me.running_event)
    }

    async fn query_latest_event(&self, since: DateTime<Utc>) -> Result<Option<Event>, ApiError> {
        let page: EventsPage = self
            .execute(
                queries::EVENTS,
                "events",
                json!({ "since": since, "days": 3, "limit": 2 }),
            )
            .await?;
        Ok(page.events.into_iter().next())
    }

    async fn query_events(&self, since: DateTime<Utc>, days: u32) -> Result<EventsPage, ApiError> {
        self.execute(
            queries::EVENTS,
            "events",
            json!({ "since": since, "days": days }),
        )
        .await
    }

    async fn update_event(&self, id: EventId, input: &EventUpdateInput) -> Result<Event, ApiError> {
        self.execute(
            queries::EVENT_UPDATE,
            "eventUpdate",
            json!({ "id": id, "input": input }),
        )
        .await
    }

    async fn delete_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.execute(queries::EVENT_DELETE, "eventDelete", json!({ "id": id }))
            .await
    }

    async fn remove_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.execute(queries::EVENT_REMOVE, "eventRemove", json!({ "id": id }))
            .await
    }
}
