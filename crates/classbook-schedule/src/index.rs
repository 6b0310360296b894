//! Per-day lookup over a snapshot of bookings and availability.
//!
//! Built once per snapshot load. Calendar views then answer "what happens on
//! this day for this teacher" with a map lookup instead of re-filtering every
//! booking for every cell.

use std::collections::{BTreeSet, HashMap};
use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use classbook_core::types::{CalendarMonth, TimezoneOffset};
use uuid::Uuid;

use crate::model::{AvailabilitySlot, ClassBooking, Session};

type DayKey = (Uuid, NaiveDate);

/// Immutable index of sessions and availability keyed by `(teacher_id, local date)`.
#[derive(Debug, Clone, Default)]
pub struct CalendarIndex {
    offset: TimezoneOffset,
    sessions: HashMap<DayKey, Vec<Session>>,
    availability: HashMap<DayKey, AvailabilitySlot>,
    owners: HashMap<Uuid, Uuid>,
}

impl CalendarIndex {
    /// ## Summary
    /// Indexes every session of every booking, and every availability slot.
    ///
    /// Sessions are grouped under the teacher's local date at `offset`.
    /// Single bookings contribute their one implicit session.
    #[must_use]
    pub fn build(
        bookings: &[ClassBooking],
        availability: &[AvailabilitySlot],
        offset: TimezoneOffset,
    ) -> Self {
        Self::build_filtered(bookings, availability, offset, |_| true)
    }

    /// ## Summary
    /// Like [`CalendarIndex::build`], keeping only local dates inside `month`.
    #[must_use]
    pub fn build_for_month(
        bookings: &[ClassBooking],
        availability: &[AvailabilitySlot],
        offset: TimezoneOffset,
        month: CalendarMonth,
    ) -> Self {
        Self::build_filtered(bookings, availability, offset, |date| month.contains(date))
    }

    fn build_filtered(
        bookings: &[ClassBooking],
        availability: &[AvailabilitySlot],
        offset: TimezoneOffset,
        keep: impl Fn(NaiveDate) -> bool,
    ) -> Self {
        let mut index = Self {
            offset,
            ..Self::default()
        };

        for booking in bookings {
            for session in booking.sessions() {
                let date = session.local_date(offset);
                if !keep(date) {
                    continue;
                }
                index
                    .sessions
                    .entry((booking.teacher_id, date))
                    .or_default()
                    .push(session.clone());
                index.owners.insert(session.id, booking.id);
            }
        }

        for day in index.sessions.values_mut() {
            day.sort_by_key(|session| (session.start_instant, session.sequence_number));
        }

        for slot in availability {
            if !keep(slot.date) {
                continue;
            }
            match index.availability.entry(slot.key()) {
                Entry::Vacant(entry) => {
                    entry.insert(slot.clone());
                }
                Entry::Occupied(_) => {
                    tracing::warn!(
                        teacher_id = %slot.teacher_id,
                        date = %slot.date,
                        "Duplicate availability slot in snapshot, keeping the first"
                    );
                }
            }
        }

        tracing::debug!(
            bookings = bookings.len(),
            session_days = index.sessions.len(),
            sessions = index.owners.len(),
            availability_days = index.availability.len(),
            %offset,
            "Built calendar index"
        );

        index
    }

    /// Sessions a teacher has on a local date, earliest first.
    #[must_use]
    pub fn sessions_on(&self, teacher_id: Uuid, date: NaiveDate) -> &[Session] {
        self.sessions
            .get(&(teacher_id, date))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Availability slot a teacher declared for a date, if any.
    #[must_use]
    pub fn availability_on(&self, teacher_id: Uuid, date: NaiveDate) -> Option<&AvailabilitySlot> {
        self.availability.get(&(teacher_id, date))
    }

    /// Booking that owns an indexed session.
    #[must_use]
    pub fn booking_of(&self, session_id: Uuid) -> Option<Uuid> {
        self.owners.get(&session_id).copied()
    }

    /// Local dates on which a teacher has at least one session, ascending.
    #[must_use]
    pub fn dates_with_sessions(&self, teacher_id: Uuid) -> Vec<NaiveDate> {
        self.sessions
            .keys()
            .filter(|(teacher, _)| *teacher == teacher_id)
            .map(|(_, date)| *date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Offset used to project sessions onto local dates.
    #[must_use]
    pub const fn offset(&self) -> TimezoneOffset {
        self.offset
    }
}
