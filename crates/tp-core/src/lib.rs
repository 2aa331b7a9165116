//! Core domain logic for the todopeer client.
//!
//! This crate contains the backend-agnostic pieces of the client:
//! - Time tokens: resolving `now`, `p5m`, `09:30` and day offsets to instants
//! - Summaries: per-task time totals and compact duration formatting
//! - Domain types: tasks, events and their identifiers

mod clock;
pub mod event;
pub mod summary;
pub mod task;
pub mod time;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event::Event;
pub use summary::{Interval, Summary, format_duration, summarize};
pub use task::Task;
pub use time::{DayShift, TimeError, TimeResolver, parse_day_offset, parse_duration, resolve_time};
pub use types::{EventId, TaskId, TaskStatus, UserId, ValidationError};
