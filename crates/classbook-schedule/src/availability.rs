//! Decides whether a teacher may mark a calendar date as available.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::index::CalendarIndex;

/// Why a date cannot be marked available.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityRejection {
    #[error("Teacher already has classes on this date")]
    HasClasses,

    #[error("Availability is already set for this date")]
    AlreadyAvailable,
}

impl AvailabilityRejection {
    /// Stable code shown to clients.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::HasClasses => "HAS_CLASSES",
            Self::AlreadyAvailable => "ALREADY_AVAILABLE",
        }
    }
}

/// ## Summary
/// Checks whether `date` may be marked available for `teacher_id`.
///
/// A day with any session is rejected with `HasClasses`, even when a slot
/// also exists; otherwise a day that already has a slot is rejected with
/// `AlreadyAvailable`.
///
/// This is a pre-check against one snapshot. Inserting the slot is up to the
/// caller, and the store must still enforce one slot per `(teacher, date)`.
///
/// ## Errors
/// Returns the `AvailabilityRejection` that applies.
pub fn can_mark_available(
    index: &CalendarIndex,
    teacher_id: Uuid,
    date: NaiveDate,
) -> Result<(), AvailabilityRejection> {
    let verdict = if !index.sessions_on(teacher_id, date).is_empty() {
        Err(AvailabilityRejection::HasClasses)
    } else if index.availability_on(teacher_id, date).is_some() {
        Err(AvailabilityRejection::AlreadyAvailable)
    } else {
        Ok(())
    };

    tracing::trace!(%teacher_id, %date, verdict = ?verdict, "Checked availability");
    verdict
}
