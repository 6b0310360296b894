//! Moving a single session of a booking.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::model::session::ensure_ordered;
use crate::model::{BookingSchedule, ClassBooking, Session};

/// ## Summary
/// Returns a copy of `booking` with one session moved to `new_start..new_end`.
///
/// For a recurring booking `session_id` selects the session; every other
/// session is returned unchanged. For a single booking the implicit session is
/// moved and `session_id` is ignored. The moved session is flagged as
/// rescheduled and remembers its previous start. Sequence numbers, the
/// session count and the recurrence rule are never touched.
///
/// ## Errors
/// - `InvalidTimeRange` if `new_end <= new_start`.
/// - `SessionNotFound` if the booking is recurring and `session_id` is absent
///   or matches none of its sessions.
pub fn reschedule(
    booking: &ClassBooking,
    session_id: Option<Uuid>,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
) -> ScheduleResult<ClassBooking> {
    ensure_ordered(new_start, new_end)?;

    let mut updated = booking.clone();
    let target = match &mut updated.schedule {
        BookingSchedule::Recurring { sessions, .. } => session_id
            .and_then(|id| sessions.iter_mut().find(|session| session.id == id))
            .ok_or(ScheduleError::SessionNotFound {
                booking_id: booking.id,
                session_id,
            })?,
        BookingSchedule::Single { session } => {
            if let Some(ignored) = session_id {
                tracing::debug!(
                    booking_id = %booking.id,
                    session_id = %ignored,
                    "Ignoring session id for single booking"
                );
            }
            session
        }
    };

    move_session(target, new_start, new_end);
    tracing::debug!(
        booking_id = %booking.id,
        session_id = %target.id,
        sequence_number = target.sequence_number,
        start = %new_start,
        end = %new_end,
        "Rescheduled session"
    );

    Ok(updated)
}

fn move_session(session: &mut Session, new_start: DateTime<Utc>, new_end: DateTime<Utc>) {
    session.rescheduled_from = Some(session.start_instant);
    session.start_instant = new_start;
    session.end_instant = new_end;
    session.is_rescheduled = true;
}
