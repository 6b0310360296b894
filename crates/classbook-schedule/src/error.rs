use thiserror::Error;
use uuid::Uuid;

/// Scheduling errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrenceRule(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Session {session_id:?} not found in booking {booking_id}")]
    SessionNotFound {
        booking_id: Uuid,
        session_id: Option<Uuid>,
    },

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Invalid booking {booking_id}: {reason}")]
    InvalidBooking { booking_id: Uuid, reason: String },
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
