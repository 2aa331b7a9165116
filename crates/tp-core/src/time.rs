//! Relative time tokens.
//!
//! Commands accept points in time as short tokens resolved against an anchor:
//!
//! - `now`: the current instant.
//! - `p<duration>` / `n<duration>`: the anchor minus / plus a duration, e.g.
//!   `p5m`, `n1h30m`.
//! - `HH:MM` or `HH:MM:SS`: a wall-clock time on the anchor's local date.
//!
//! Day-offset tokens (`p<days>` / `n<days>`) share the prefixes but are a
//! separate grammar, parsed by [`parse_day_offset`], and only ever shift the
//! anchor's calendar date.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::Clock;

/// Errors from parsing or resolving time tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// A clock token that is not `HH:MM[:SS]` or names an impossible time.
    #[error("expect time in format of HH:MM[:SS], got: {token} ({reason})")]
    MalformedAbsoluteToken { token: String, reason: &'static str },

    /// A day offset that is not `p<days>` or `n<days>`.
    #[error("unknown offset: {token} (expected p<days> or n<days>, e.g. p1)")]
    MalformedDayOffset { token: String },

    /// A duration expression that does not follow the `1h30m` grammar.
    #[error("invalid duration: {input} (expected e.g. 30s, 5m, 1h30m)")]
    InvalidDuration { input: String },

    /// Shifting the anchor left the representable date range.
    #[error("day offset out of range: {days}")]
    DayOffsetOutOfRange { days: i64 },

    /// A relative token moved the anchor past the representable range.
    #[error("time offset out of range: {token}")]
    OffsetOutOfRange { token: String },
}

impl TimeError {
    fn malformed(token: &str, reason: &'static str) -> Self {
        Self::MalformedAbsoluteToken {
            token: token.to_string(),
            reason,
        }
    }
}

/// How a day offset moves the anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayShift {
    /// Move the calendar date and keep the wall-clock time, even across
    /// daylight-saving transitions.
    #[default]
    Calendar,
    /// Move by exact multiples of 24 hours.
    FixedHours,
}

/// Parses a day offset token: `p<days>` is in the past, `n<days>` in the future.
pub fn parse_day_offset(token: &str) -> Result<i64, TimeError> {
    let malformed = || TimeError::MalformedDayOffset {
        token: token.to_string(),
    };

    let mut chars = token.chars();
    let sign = match chars.next() {
        Some('p') => -1,
        Some('n') => 1,
        _ => return Err(malformed()),
    };

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let days: i64 = digits.parse().map_err(|_| malformed())?;
    Ok(sign * days)
}

/// Parses a compact duration such as `30s`, `5m`, `1h30m` or `1.5h`.
///
/// Each group is a decimal number with an optional fraction followed by a
/// unit (`h`, `m`, `s`, `ms`, `us`/`µs`, `ns`). A leading sign is allowed and
/// a bare `0` means zero.
pub fn parse_duration(input: &str) -> Result<TimeDelta, TimeError> {
    let invalid = || TimeError::InvalidDuration {
        input: input.to_string(),
    };

    let (negative, mut rest) = if let Some(stripped) = input.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, input.strip_prefix('+').unwrap_or(input))
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after) = rest.split_at(int_len);

        let (frac_part, after) = match after.strip_prefix('.') {
            Some(stripped) => {
                let frac_len = stripped.bytes().take_while(u8::is_ascii_digit).count();
                stripped.split_at(frac_len)
            }
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let nanos_per_unit: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            _ => return Err(invalid()),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut group = whole.checked_mul(nanos_per_unit).ok_or_else(invalid)?;

        if !frac_part.is_empty() {
            // Digits past nanosecond precision cannot change the result.
            let digits = &frac_part[..frac_part.len().min(18)];
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            let denominator = digits.bytes().fold(1_u128, |acc, _| acc * 10);
            group = group
                .checked_add(numerator * nanos_per_unit / denominator)
                .ok_or_else(invalid)?;
        }

        total_nanos = total_nanos.checked_add(group).ok_or_else(invalid)?;
        rest = after;
    }

    let nanos = i64::try_from(total_nanos).map_err(|_| invalid())?;
    let delta = TimeDelta::nanoseconds(nanos);
    Ok(if negative { -delta } else { delta })
}

/// Splits `p<duration>` / `n<duration>` into a signed duration.
///
/// Returns `None` when the token is not a relative offset, so the caller can
/// try the absolute clock grammar instead.
fn relative_offset(token: &str) -> Option<TimeDelta> {
    if let Some(rest) = token.strip_prefix('p') {
        parse_duration(rest).ok().map(|d| -d)
    } else if let Some(rest) = token.strip_prefix('n') {
        parse_duration(rest).ok()
    } else {
        None
    }
}

/// Parses `HH:MM` or `HH:MM:SS` into a time of day.
fn parse_clock(token: &str) -> Result<NaiveTime, TimeError> {
    let parts: Vec<&str> = token.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(TimeError::malformed(token, "expected 2 or 3 components"));
    }

    let mut hms = [0_u32; 3];
    for (slot, part) in hms.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| TimeError::malformed(token, "time isn't number"))?;
    }

    NaiveTime::from_hms_opt(hms[0], hms[1], hms[2])
        .ok_or_else(|| TimeError::malformed(token, "time of day out of range"))
}

/// What a non-empty, non-`now` token asks for.
enum Target {
    Offset(TimeDelta),
    Clock(NaiveTime),
}

/// Resolves time tokens in a timezone, reading "now" from a [`Clock`].
#[derive(Debug)]
pub struct TimeResolver<'a, Tz: TimeZone, C: Clock> {
    tz: Tz,
    clock: &'a C,
    day_shift: DayShift,
}

impl<'a, Tz: TimeZone, C: Clock> TimeResolver<'a, Tz, C> {
    pub const fn new(tz: Tz, clock: &'a C) -> Self {
        Self {
            tz,
            clock,
            day_shift: DayShift::Calendar,
        }
    }

    #[must_use]
    pub fn with_day_shift(mut self, day_shift: DayShift) -> Self {
        self.day_shift = day_shift;
        self
    }

    /// Resolves `token` against `reference` (or the current time when absent),
    /// after moving the anchor by `day_offset` days.
    ///
    /// An empty token means no change was requested and resolves to `None`.
    /// `now` ignores both the reference and the day offset.
    pub fn resolve(
        &self,
        token: &str,
        reference: Option<DateTime<Utc>>,
        day_offset: i64,
    ) -> Result<Option<DateTime<Tz>>, TimeError> {
        if token.is_empty() {
            return Ok(None);
        }
        if token == "now" {
            return Ok(Some(self.clock.now().with_timezone(&self.tz)));
        }

        // Validate the clock text before touching the anchor so a bad token
        // never depends on the reference.
        let target = match relative_offset(token) {
            Some(offset) => Target::Offset(offset),
            None => Target::Clock(parse_clock(token)?),
        };

        let anchor = reference
            .unwrap_or_else(|| self.clock.now())
            .with_timezone(&self.tz);
        let anchor = self.shift(anchor, day_offset)?;

        let resolved = match target {
            Target::Offset(offset) => anchor
                .checked_add_signed(offset)
                .ok_or_else(|| TimeError::OffsetOutOfRange {
                    token: token.to_string(),
                })?,
            Target::Clock(time) => self.on_date(anchor.date_naive(), time, token)?,
        };

        tracing::debug!(token, day_offset, resolved = %resolved.with_timezone(&Utc), "resolved time token");
        Ok(Some(resolved))
    }

    /// The first instant of the local day `day_offset` days from today.
    ///
    /// Where a daylight-saving jump skips midnight the day starts at the
    /// first local time that exists.
    pub fn start_of_day(&self, day_offset: i64) -> Result<DateTime<Tz>, TimeError> {
        let out_of_range = || TimeError::DayOffsetOutOfRange { days: day_offset };
        let today = self.clock.now().with_timezone(&self.tz).date_naive();
        let step = Days::new(day_offset.unsigned_abs());
        let date = if day_offset >= 0 {
            today.checked_add_days(step)
        } else {
            today.checked_sub_days(step)
        }
        .ok_or_else(out_of_range)?;
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(out_of_range)?;

        // Gaps are shorter than a day; walk forward a minute at a time.
        (0..24 * 60)
            .filter_map(|minutes| midnight.checked_add_signed(TimeDelta::minutes(minutes)))
            .find_map(|local| self.tz.from_local_datetime(&local).earliest())
            .ok_or_else(out_of_range)
    }

    fn shift(&self, anchor: DateTime<Tz>, days: i64) -> Result<DateTime<Tz>, TimeError> {
        if days == 0 {
            return Ok(anchor);
        }
        let out_of_range = TimeError::DayOffsetOutOfRange { days };
        let fixed = |anchor: &DateTime<Tz>| {
            TimeDelta::try_days(days)
                .and_then(|delta| anchor.clone().checked_add_signed(delta))
                .ok_or_else(|| out_of_range.clone())
        };

        match self.day_shift {
            DayShift::FixedHours => fixed(&anchor),
            DayShift::Calendar => {
                let naive = anchor.naive_local();
                let step = Days::new(days.unsigned_abs());
                let shifted = if days > 0 {
                    naive.checked_add_days(step)
                } else {
                    naive.checked_sub_days(step)
                }
                .ok_or_else(|| out_of_range.clone())?;

                // A wall-clock time skipped by a DST jump has no local
                // representation; keep the elapsed-time shift there.
                match self.tz.from_local_datetime(&shifted).earliest() {
                    Some(dt) => Ok(dt),
                    None => fixed(&anchor),
                }
            }
        }
    }

    fn on_date(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        token: &str,
    ) -> Result<DateTime<Tz>, TimeError> {
        self.tz
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(|| TimeError::malformed(token, "time does not exist in local timezone"))
    }
}

/// Resolves a token in the local timezone with calendar day arithmetic.
pub fn resolve_time(
    token: &str,
    reference: Option<DateTime<Utc>>,
    day_offset: i64,
    clock: &impl Clock,
) -> Result<Option<DateTime<chrono::Local>>, TimeError> {
    TimeResolver::new(chrono::Local, clock).resolve(token, reference, day_offset)
}
