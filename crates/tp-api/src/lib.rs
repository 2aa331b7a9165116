//! GraphQL client for the todopeer backend.
//!
//! [`Backend`] lists the task and event operations the CLI relies on and
//! [`Client`] implements them over HTTP with bearer-token authentication.

use thiserror::Error;

mod backend;
mod client;
pub mod model;
mod queries;

pub use backend::Backend;
pub use client::{Client, DEFAULT_ENDPOINT};
pub use model::{
    AuthPayload, EventUpdateInput, EventsPage, Me, Patch, QueryTaskInput, StartedTask,
    TaskCreateInput, TaskStartInput, TaskUpdateInput, TaskWithEvents, User,
};

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provided token was invalid.
    #[error("invalid token: {reason}")]
    InvalidToken { reason: &'static str },
    #[error("endpoint cannot be empty")]
    InvalidEndpoint,
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success status without a GraphQL error body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The token is missing, expired or revoked.
    #[error("access denied")]
    AccessDenied,
    /// The backend rejected the operation.
    #[error("{message}")]
    Graphql { message: String },
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether logging in again could fix this error.
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied)
    }
}
