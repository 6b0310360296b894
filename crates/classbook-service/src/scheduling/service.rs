//! Scheduling operations exposed to the console.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use classbook_core::config::Settings;
use classbook_core::types::{CalendarMonth, TimezoneOffset};
use classbook_schedule::availability::can_mark_available;
use classbook_schedule::expand::expand;
use classbook_schedule::index::CalendarIndex;
use classbook_schedule::model::{AvailabilitySlot, ClassBooking, RecurrenceRule, Session};
use classbook_schedule::reschedule::reschedule;
use classbook_schedule::time::{local_date, to_absolute};
use uuid::Uuid;

use super::request::{NewClassBooking, NewSchedule};
use crate::error::ServiceResult;
use crate::snapshot::CalendarSnapshot;
use crate::store::AvailabilityStore;

/// Scheduling entry point, bound to the configured teacher timezone offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulingService {
    offset: TimezoneOffset,
}

impl SchedulingService {
    #[must_use]
    pub const fn new(offset: TimezoneOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.scheduling.timezone_offset_minutes)
    }

    #[must_use]
    pub const fn offset(&self) -> TimezoneOffset {
        self.offset
    }

    /// ## Summary
    /// Expands a recurrence rule into the sessions to persist with a new booking.
    ///
    /// The rule carries its own offset, recorded when the booking was created.
    ///
    /// ## Errors
    /// Returns the rule validation error if the rule cannot be expanded.
    pub fn expand_recurrence(
        &self,
        booking_id: Uuid,
        rule: &RecurrenceRule,
    ) -> ServiceResult<Vec<Session>> {
        if rule.timezone_offset_minutes != self.offset {
            tracing::debug!(
                %booking_id,
                rule_offset = %rule.timezone_offset_minutes,
                configured_offset = %self.offset,
                "Expanding rule recorded at a different offset"
            );
        }
        Ok(expand(booking_id, rule)?)
    }

    /// ## Summary
    /// Builds a booking from a creation request, assigning a fresh id.
    ///
    /// Recurring requests become a `RecurrenceRule` at the configured offset
    /// and are expanded immediately. Single requests convert their local date
    /// and times to instants.
    ///
    /// ## Errors
    /// Returns rule validation errors, or `InvalidTimeRange` if a single
    /// class ends at or before its start.
    pub fn create_booking(&self, request: NewClassBooking) -> ServiceResult<ClassBooking> {
        let id = Uuid::new_v4();
        let NewClassBooking {
            batch_id,
            teacher_id,
            student_ids,
            class_link,
            schedule,
        } = request;

        let booking = match schedule {
            NewSchedule::Recurring {
                start_date,
                weekday_rules,
                session_count,
            } => {
                let rule = RecurrenceRule {
                    start_date,
                    weekday_rules,
                    session_count,
                    timezone_offset_minutes: self.offset,
                };
                ClassBooking::recurring(id, batch_id, teacher_id, student_ids, class_link, rule)?
            }
            NewSchedule::Single {
                date,
                local_start_time,
                local_end_time,
            } => {
                let (start, end) = self.local_window(date, local_start_time, local_end_time)?;
                ClassBooking::single(id, batch_id, teacher_id, student_ids, class_link, start, end)?
            }
        };

        tracing::info!(
            booking_id = %booking.id,
            %teacher_id,
            recurring = booking.is_recurring(),
            sessions = booking.sessions().len(),
            "Created booking"
        );
        Ok(booking)
    }

    /// ## Summary
    /// Converts a local date and wall-clock window to instants at the
    /// configured offset.
    ///
    /// ## Errors
    /// Returns `DateOutOfRange` if either instant cannot be represented.
    pub fn local_window(
        &self,
        date: NaiveDate,
        local_start_time: NaiveTime,
        local_end_time: NaiveTime,
    ) -> ServiceResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            to_absolute(date, local_start_time, self.offset)?,
            to_absolute(date, local_end_time, self.offset)?,
        ))
    }

    /// ## Summary
    /// Indexes a snapshot for a calendar view, optionally scoped to one month.
    #[must_use]
    pub fn build_calendar_index(
        &self,
        snapshot: &CalendarSnapshot,
        month: Option<CalendarMonth>,
    ) -> CalendarIndex {
        match month {
            Some(month) => CalendarIndex::build_for_month(
                &snapshot.bookings,
                &snapshot.availability,
                self.offset,
                month,
            ),
            None => CalendarIndex::build(&snapshot.bookings, &snapshot.availability, self.offset),
        }
    }

    /// ## Summary
    /// Pre-checks whether a teacher may mark `date` available.
    ///
    /// ## Errors
    /// Returns `ServiceError::Rejected` with `HasClasses` or `AlreadyAvailable`.
    pub fn can_mark_available(
        &self,
        index: &CalendarIndex,
        teacher_id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<()> {
        if index.offset() != self.offset {
            tracing::warn!(
                index_offset = %index.offset(),
                configured_offset = %self.offset,
                "Calendar index was built at a different offset"
            );
        }
        Ok(can_mark_available(index, teacher_id, date)?)
    }

    /// ## Summary
    /// Checks a new slot's window and its date against the index, then
    /// inserts it into `store`.
    ///
    /// The store's uniqueness constraint is authoritative: if another request
    /// inserted the same `(teacher, date)` after `index` was built, the store
    /// conflict is reported as `AlreadyAvailable` too.
    ///
    /// ## Errors
    /// - `InvalidTimeRange` if the slot ends at or before its start.
    /// - `ServiceError::Rejected` from the pre-check or a store conflict.
    /// - `ServiceError::Storage` if the store fails otherwise.
    pub fn mark_available(
        &self,
        index: &CalendarIndex,
        store: &impl AvailabilityStore,
        slot: AvailabilitySlot,
    ) -> ServiceResult<()> {
        slot.validate()?;
        self.can_mark_available(index, slot.teacher_id, slot.date)?;

        let (teacher_id, date) = slot.key();
        store.insert(slot)?;
        tracing::info!(%teacher_id, %date, "Marked date available");
        Ok(())
    }

    /// ## Summary
    /// Moves one session of a booking.
    ///
    /// ## Errors
    /// `InvalidTimeRange` if `new_end <= new_start`; `SessionNotFound` if a
    /// recurring booking has no session `session_id`.
    pub fn reschedule_session(
        &self,
        booking: &ClassBooking,
        session_id: Option<Uuid>,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> ServiceResult<ClassBooking> {
        let updated = reschedule(booking, session_id, new_start, new_end)?;
        tracing::info!(
            booking_id = %booking.id,
            new_local_date = %local_date(new_start, self.offset),
            "Rescheduled session"
        );
        Ok(updated)
    }
}
