//! Per-task time totals and duration formatting.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::Clock;
use crate::event::Event;
use crate::types::TaskId;

/// A tracked interval attributed to a task.
///
/// `end == None` means the interval is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub task: TaskId,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl From<&Event> for Interval {
    fn from(event: &Event) -> Self {
        Self {
            task: event.task_id,
            start: event.start_at,
            end: event.end_at,
        }
    }
}

/// Accumulated time per task, remembering the order tasks were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    totals: HashMap<TaskId, TimeDelta>,
    order: Vec<TaskId>,
}

impl Summary {
    /// Adds `spent` to the running total of `task`.
    pub fn add(&mut self, task: TaskId, spent: TimeDelta) {
        let total = self.totals.entry(task).or_insert_with(|| {
            self.order.push(task);
            TimeDelta::zero()
        });
        *total += spent;
    }

    pub fn get(&self, task: TaskId) -> Option<TimeDelta> {
        self.totals.get(&task).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum over all tasks.
    pub fn total(&self) -> TimeDelta {
        self.totals.values().copied().sum()
    }

    /// Tasks ordered by accumulated time, largest first.
    ///
    /// Tasks with equal totals keep the order in which they were first seen.
    pub fn ranked(&self) -> Vec<(TaskId, TimeDelta)> {
        let mut ranked: Vec<_> = self
            .order
            .iter()
            .map(|task| (*task, self.totals[task]))
            .collect();
        ranked.sort_by_key(|(_, spent)| std::cmp::Reverse(*spent));
        ranked
    }
}

/// Sums interval lengths per task.
///
/// Running intervals are measured up to `clock.now()` at the time of the
/// call, so calling again later yields a larger total.
pub fn summarize<'a, I>(intervals: I, clock: &impl Clock) -> Summary
where
    I: IntoIterator<Item = &'a Interval>,
{
    let now = clock.now();
    let mut summary = Summary::default();
    for interval in intervals {
        let end = interval.end.unwrap_or(now);
        if end < interval.start {
            tracing::warn!(task = %interval.task, start = %interval.start, end = %end, "interval ends before it starts");
        }
        summary.add(interval.task, end - interval.start);
    }
    summary
}

/// Formats a duration as `1h2m3s`, leaving out units with a zero count.
///
/// Hours and minutes are emitted when at least one whole unit remains;
/// seconds only when `include_seconds` is set. Durations below the smallest
/// emitted unit, and negative durations, format as an empty string.
pub fn format_duration(duration: TimeDelta, include_seconds: bool) -> String {
    let mut out = String::new();
    let mut remaining = duration;

    let hours = remaining.num_hours();
    if hours >= 1 {
        let _ = write!(out, "{hours}h");
        remaining -= TimeDelta::hours(hours);
    }

    let minutes = remaining.num_minutes();
    if minutes >= 1 {
        let _ = write!(out, "{minutes}m");
        remaining -= TimeDelta::minutes(minutes);
    }

    let seconds = remaining.num_seconds();
    if include_seconds && seconds >= 1 {
        let _ = write!(out, "{seconds}s");
    }

    out
}
