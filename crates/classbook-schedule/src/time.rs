//! Conversion between a teacher's wall-clock time and stored UTC instants.
//!
//! All arithmetic uses a fixed offset supplied by the caller. No timezone
//! database is consulted, so there are no DST gaps or folds: every local
//! date-time maps to exactly one instant and back.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use classbook_core::types::TimezoneOffset;

use crate::error::{ScheduleError, ScheduleResult};

/// ## Summary
/// Converts a local date and time-of-day to an absolute instant
/// (`absolute = local - offset`).
///
/// ## Errors
/// Returns `ScheduleError::DateOutOfRange` if the shifted instant cannot be
/// represented.
pub fn to_absolute(
    date: NaiveDate,
    time: NaiveTime,
    offset: TimezoneOffset,
) -> ScheduleResult<DateTime<Utc>> {
    let local = date.and_time(time);
    offset
        .fixed()
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::DateOutOfRange(format!("{local} at {offset}")))
}

/// ## Summary
/// Projects an instant onto the local calendar: returns the wall-clock date
/// and time-of-day at `offset`.
#[must_use]
pub fn to_local(instant: DateTime<Utc>, offset: TimezoneOffset) -> (NaiveDate, NaiveTime) {
    let local = instant.with_timezone(&offset.fixed()).naive_local();
    (local.date(), local.time())
}

/// Local calendar date of an instant.
#[must_use]
pub fn local_date(instant: DateTime<Utc>, offset: TimezoneOffset) -> NaiveDate {
    to_local(instant, offset).0
}

/// Local weekday of an instant.
#[must_use]
pub fn local_weekday(instant: DateTime<Utc>, offset: TimezoneOffset) -> Weekday {
    local_date(instant, offset).weekday()
}
