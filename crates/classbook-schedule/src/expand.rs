//! Expansion of weekly recurrence rules into concrete sessions.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::model::{RecurrenceRule, Session, WeekdayRule};
use crate::time::to_absolute;

/// ## Summary
/// Expands a recurrence rule into its sessions.
///
/// Walks the calendar one day at a time from `rule.start_date` (inclusive).
/// Each day whose weekday has a rule yields a session at that rule's local
/// times; days without a rule are skipped. Stops as soon as
/// `rule.session_count` sessions exist.
///
/// The result is ordered strictly ascending by start instant and numbered
/// 1..=n. Session ids are derived from `booking_id` and the sequence number,
/// so expanding the same rule for the same booking is deterministic.
///
/// ## Errors
/// - `InvalidRecurrenceRule` if the rule has no weekdays, a zero session
///   count, or a repeated weekday.
/// - `InvalidTimeRange` if a weekday rule ends at or before its start.
/// - `DateOutOfRange` if the series runs off the representable calendar.
pub fn expand(booking_id: Uuid, rule: &RecurrenceRule) -> ScheduleResult<Vec<Session>> {
    rule.validate()?;

    let by_weekday: HashMap<Weekday, &WeekdayRule> = rule
        .weekday_rules
        .iter()
        .map(|weekday_rule| (weekday_rule.weekday, weekday_rule))
        .collect();

    tracing::debug!(
        %booking_id,
        start_date = %rule.start_date,
        session_count = rule.session_count,
        weekdays = by_weekday.len(),
        offset = %rule.timezone_offset_minutes,
        "Expanding recurrence rule"
    );

    let mut sessions = Vec::new();
    let mut sequence_number = 0u32;
    let mut cursor = rule.start_date;

    loop {
        if let Some(day_rule) = by_weekday.get(&cursor.weekday()) {
            sequence_number += 1;
            let session = session_on(booking_id, sequence_number, cursor, day_rule, rule)?;
            tracing::trace!(
                sequence_number,
                date = %cursor,
                start = %session.start_instant,
                "Synthesized session"
            );
            sessions.push(session);

            if sequence_number == rule.session_count {
                break;
            }
        }

        cursor = cursor
            .succ_opt()
            .ok_or_else(|| ScheduleError::DateOutOfRange(format!("no day after {cursor}")))?;
    }

    Ok(sessions)
}

/// Deterministic id of the `sequence_number`-th session of a booking.
#[must_use]
pub fn session_id(booking_id: Uuid, sequence_number: u32) -> Uuid {
    Uuid::new_v5(&booking_id, &sequence_number.to_be_bytes())
}

fn session_on(
    booking_id: Uuid,
    sequence_number: u32,
    date: NaiveDate,
    day_rule: &WeekdayRule,
    rule: &RecurrenceRule,
) -> ScheduleResult<Session> {
    let offset = rule.timezone_offset_minutes;
    let start = to_absolute(date, day_rule.local_start_time, offset)?;
    let end = to_absolute(date, day_rule.local_end_time, offset)?;
    Session::scheduled(
        session_id(booking_id, sequence_number),
        sequence_number,
        start,
        end,
    )
}
