//! Scheduled classes: a single session or a recurring series.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rule::RecurrenceRule;
use super::session::Session;
use crate::error::{ScheduleError, ScheduleResult};
use crate::expand::expand;

/// When a booking's classes take place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BookingSchedule {
    /// A series expanded from `rule`; `sessions.len() == rule.session_count`.
    Recurring {
        rule: RecurrenceRule,
        sessions: Vec<Session>,
    },
    /// One implicit session whose id is the booking id.
    Single { session: Session },
}

/// A scheduled class for a batch of students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassBooking {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub teacher_id: Uuid,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
    #[serde(default)]
    pub class_link: String,
    pub schedule: BookingSchedule,
}

impl ClassBooking {
    /// ## Summary
    /// Creates a recurring booking, expanding `rule` into its sessions.
    ///
    /// ## Errors
    /// Returns the expansion error if the rule is invalid.
    pub fn recurring(
        id: Uuid,
        batch_id: Uuid,
        teacher_id: Uuid,
        student_ids: Vec<Uuid>,
        class_link: String,
        rule: RecurrenceRule,
    ) -> ScheduleResult<Self> {
        let sessions = expand(id, &rule)?;
        Ok(Self {
            id,
            batch_id,
            teacher_id,
            student_ids,
            class_link,
            schedule: BookingSchedule::Recurring { rule, sessions },
        })
    }

    /// ## Summary
    /// Creates a one-off booking.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` if `end <= start`.
    pub fn single(
        id: Uuid,
        batch_id: Uuid,
        teacher_id: Uuid,
        student_ids: Vec<Uuid>,
        class_link: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ScheduleResult<Self> {
        let session = Session::scheduled(id, 1, start, end)?;
        Ok(Self {
            id,
            batch_id,
            teacher_id,
            student_ids,
            class_link,
            schedule: BookingSchedule::Single { session },
        })
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        matches!(self.schedule, BookingSchedule::Recurring { .. })
    }

    /// Every session of the booking in sequence order.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        match &self.schedule {
            BookingSchedule::Recurring { sessions, .. } => sessions,
            BookingSchedule::Single { session } => std::slice::from_ref(session),
        }
    }

    #[must_use]
    pub fn session(&self, session_id: Uuid) -> Option<&Session> {
        self.sessions().iter().find(|session| session.id == session_id)
    }

    #[must_use]
    pub fn rule(&self) -> Option<&RecurrenceRule> {
        match &self.schedule {
            BookingSchedule::Recurring { rule, .. } => Some(rule),
            BookingSchedule::Single { .. } => None,
        }
    }

    /// ## Summary
    /// Checks the structural invariants of a booking received from outside
    /// this crate, e.g. deserialized from a REST payload.
    ///
    /// Session order by start instant is not checked: a reschedule may move a
    /// session past its siblings.
    ///
    /// ## Errors
    /// - `InvalidBooking` if a recurring booking's session count or sequence
    ///   numbers disagree with its rule, two of its sessions share an id, or a
    ///   single booking's session is not #1.
    /// - `InvalidTimeRange` / `InvalidRecurrenceRule` from the rule or sessions.
    pub fn validate(&self) -> ScheduleResult<()> {
        let invalid = |reason: String| ScheduleError::InvalidBooking {
            booking_id: self.id,
            reason,
        };

        match &self.schedule {
            BookingSchedule::Recurring { rule, sessions } => {
                rule.validate()?;
                if u32::try_from(sessions.len()).ok() != Some(rule.session_count) {
                    return Err(invalid(format!(
                        "{} sessions for a rule of {}",
                        sessions.len(),
                        rule.session_count
                    )));
                }
                let mut seen = HashSet::with_capacity(sessions.len());
                if let Some(repeated) = sessions.iter().find(|session| !seen.insert(session.id)) {
                    return Err(invalid(format!("session id {} appears twice", repeated.id)));
                }
                for (expected, session) in (1..).zip(sessions) {
                    if session.sequence_number != expected {
                        return Err(invalid(format!(
                            "session {} has sequence number {}, expected {expected}",
                            session.id, session.sequence_number
                        )));
                    }
                }
            }
            BookingSchedule::Single { session } => {
                if session.sequence_number != 1 {
                    return Err(invalid(format!(
                        "single session has sequence number {}",
                        session.sequence_number
                    )));
                }
            }
        }

        for session in self.sessions() {
            super::session::ensure_ordered(session.start_instant, session.end_instant)?;
        }

        Ok(())
    }
}
