//! Everything a command needs besides its arguments.

use chrono::{DateTime, TimeZone, Utc};
use tp_core::{Clock, DayShift, TimeResolver};

/// Backend, clock and timezone shared by the commands.
///
/// Output is rendered in `tz`; tests pin it to a fixed zone.
#[derive(Debug)]
pub struct Context<'a, B, C, Tz: TimeZone> {
    pub backend: &'a B,
    pub clock: &'a C,
    pub tz: Tz,
    pub day_shift: DayShift,
    /// Speak when a pomodoro ends.
    pub announce: bool,
}

impl<'a, B, C: Clock, Tz: TimeZone> Context<'a, B, C, Tz> {
    pub const fn new(backend: &'a B, clock: &'a C, tz: Tz, day_shift: DayShift) -> Self {
        Self {
            backend,
            clock,
            tz,
            day_shift,
            announce: true,
        }
    }

    /// The same context without spoken announcements.
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.announce = false;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Time-token resolver in this context's timezone and day-shift mode.
    pub fn resolver(&self) -> TimeResolver<'a, Tz, C> {
        TimeResolver::new(self.tz.clone(), self.clock).with_day_shift(self.day_shift)
    }
}
