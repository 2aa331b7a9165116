//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An identifier was not a positive integer.
    #[error("invalid {field}: {value}")]
    InvalidId { field: &'static str, value: String },

    /// Unknown task status value or shorthand.
    #[error("unknown task status: {value} (expected one of n, i, d, p)")]
    UnknownStatus { value: String },
}

/// Generates a backend integer ID newtype with common trait implementations.
///
/// The backend encodes IDs as JSON numbers, but GraphQL `ID` scalars may also
/// arrive as strings, so both are accepted on deserialization.
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw backend identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .map(Self)
                    .ok_or_else(|| ValidationError::InvalidId {
                        field: $field_name,
                        value: s.to_string(),
                    })
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                #[derive(Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Number(i64),
                    Text(String),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Number(id) => Ok(Self(id)),
                    Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

define_int_id!(
    /// A backend task identifier.
    TaskId, "task ID"
);

define_int_id!(
    /// A backend event identifier.
    EventId, "event ID"
);

define_int_id!(
    /// A backend user identifier.
    UserId, "user ID"
);

/// Lifecycle status of a task, as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStarted,
    Doing,
    Done,
    Paused,
}

impl TaskStatus {
    /// Wire representation used in GraphQL enums.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Doing => "DOING",
            Self::Done => "DONE",
            Self::Paused => "PAUSED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses the user-facing shorthand (`n`, `i`, `d`, `p`), the lower-case
/// long names, or the wire names.
impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" | "not_started" | "NOT_STARTED" => Ok(Self::NotStarted),
            "i" | "doing" | "DOING" => Ok(Self::Doing),
            "d" | "done" | "DONE" => Ok(Self::Done),
            "p" | "paused" | "PAUSED" => Ok(Self::Paused),
            _ => Err(ValidationError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}
