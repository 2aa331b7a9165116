//! Plain-text rendering of tasks and events.

use std::io::{self, Write};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tp_core::{Event, Task, format_duration};

const TIME: &str = "%H:%M:%S";
const DATE: &str = "%Y-%m-%d";
const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

fn local<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> NaiveDateTime {
    at.with_timezone(tz).naive_local()
}

/// Writes `id<TAB>STATUS<TAB>name<TAB>due`, leaving `due` empty when unset.
pub fn write_task<W: Write, Tz: TimeZone>(writer: &mut W, task: &Task, tz: &Tz) -> io::Result<()> {
    let due = task
        .due_date
        .map(|due| local(due, tz).format(DATE_TIME).to_string())
        .unwrap_or_default();
    writeln!(writer, "{}\t{}\t{}\t{}", task.id, task.status, task.name, due)
}

/// Renders one event per line as `[id]start - end (duration): description`.
///
/// A running event shows `doing` as its end.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFormatter {
    /// Written before the line.
    pub prefix: &'static str,
    /// Show the start date before the times.
    pub with_date: bool,
    /// Show the duration, measuring running events up to this instant.
    pub duration_until: Option<DateTime<Utc>>,
}

impl EventFormatter {
    pub fn write<W: Write, Tz: TimeZone>(
        &self,
        writer: &mut W,
        event: &Event,
        tz: &Tz,
    ) -> io::Result<()> {
        let start = local(event.start_at, tz);
        write!(writer, "{}[{}]", self.prefix, event.id)?;
        if self.with_date {
            write!(writer, "{} ", start.format(DATE))?;
        }

        let end = event.end_at.map_or_else(
            || "doing".to_string(),
            |end| local(end, tz).format(TIME).to_string(),
        );
        write!(writer, "{} - {}", start.format(TIME), end)?;

        if let Some(now) = self.duration_until {
            write!(writer, " ({})", format_duration(event.duration(now), false))?;
        }

        match &event.description {
            Some(description) => writeln!(writer, ": {description}"),
            None => writeln!(writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta};
    use tp_core::{EventId, TaskId, TaskStatus};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 29, 9, 0, 0).unwrap()
    }

    fn event(end: Option<DateTime<Utc>>, description: Option<&str>) -> Event {
        Event {
            id: EventId::new(7),
            task_id: TaskId::new(3),
            start_at: t0(),
            end_at: end,
            description: description.map(str::to_string),
        }
    }

    fn render(formatter: EventFormatter, event: &Event) -> String {
        let mut out = Vec::new();
        formatter.write(&mut out, event, &Utc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn running_event_ends_with_doing() {
        let out = render(EventFormatter::default(), &event(None, None));
        assert_eq!(out, "[7]09:00:00 - doing\n");
    }

    #[test]
    fn closed_event_with_date_duration_and_description() {
        let formatter = EventFormatter {
            prefix: "\t",
            with_date: true,
            duration_until: Some(t0() + TimeDelta::hours(8)),
        };
        let e = event(Some(t0() + TimeDelta::minutes(95)), Some("review"));
        assert_eq!(
            render(formatter, &e),
            "\t[7]2025-01-29 09:00:00 - 10:35:00 (1h35m): review\n"
        );
    }

    #[test]
    fn running_event_duration_measures_to_given_instant() {
        let formatter = EventFormatter {
            duration_until: Some(t0() + TimeDelta::minutes(20)),
            ..EventFormatter::default()
        };
        assert_eq!(render(formatter, &event(None, None)), "[7]09:00:00 - doing (20m)\n");
    }

    #[test]
    fn times_render_in_the_given_zone() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let mut out = Vec::new();
        EventFormatter::default()
            .write(&mut out, &event(Some(t0() + TimeDelta::hours(1)), None), &tz)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[7]17:00:00 - 18:00:00\n");
    }

    #[test]
    fn task_line_with_and_without_due_date() {
        let mut task = Task {
            id: TaskId::new(12),
            name: "write report".to_string(),
            description: None,
            status: TaskStatus::Doing,
            created_at: t0(),
            updated_at: t0(),
            due_date: None,
        };
        let mut out = Vec::new();
        write_task(&mut out, &task, &Utc).unwrap();
        task.due_date = Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        write_task(&mut out, &task, &Utc).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "12\tDOING\twrite report\t\n12\tDOING\twrite report\t2025-02-01 00:00:00\n"
        );
    }
}
