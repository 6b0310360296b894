//! Teacher availability: dated slots and the display-only weekly template.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};

/// A teacher-declared window of free time on one calendar date.
///
/// At most one slot exists per `(teacher_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub teacher_id: Uuid,
    pub date: NaiveDate,
    pub start_local_time: NaiveTime,
    pub end_local_time: NaiveTime,
}

impl AvailabilitySlot {
    /// ## Summary
    /// Creates a slot.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` if the window ends at or before its start.
    pub fn new(
        teacher_id: Uuid,
        date: NaiveDate,
        start_local_time: NaiveTime,
        end_local_time: NaiveTime,
    ) -> ScheduleResult<Self> {
        check_local_range(date, start_local_time, end_local_time)?;
        Ok(Self {
            teacher_id,
            date,
            start_local_time,
            end_local_time,
        })
    }

    /// ## Summary
    /// Checks the window of a slot received from outside this crate, e.g.
    /// deserialized from a snapshot or a REST payload.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` if the window ends at or before its start.
    pub fn validate(&self) -> ScheduleResult<()> {
        check_local_range(self.date, self.start_local_time, self.end_local_time)
    }

    /// Uniqueness key of the slot.
    #[must_use]
    pub const fn key(&self) -> (Uuid, NaiveDate) {
        (self.teacher_id, self.date)
    }
}

/// Typical free hours on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWindow {
    pub weekday: Weekday,
    pub start_local_time: NaiveTime,
    pub end_local_time: NaiveTime,
}

/// A teacher's recurring pattern of free hours.
///
/// Shown alongside the calendar; it is never expanded into dated
/// `AvailabilitySlot`s and plays no part in availability validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailabilityTemplate {
    pub teacher_id: Uuid,
    pub windows: Vec<WeeklyWindow>,
}

impl WeeklyAvailabilityTemplate {
    /// ## Summary
    /// Creates a template.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` if any window ends at or before its start.
    pub fn new(teacher_id: Uuid, windows: Vec<WeeklyWindow>) -> ScheduleResult<Self> {
        for window in &windows {
            check_local_range(window.weekday, window.start_local_time, window.end_local_time)?;
        }
        Ok(Self {
            teacher_id,
            windows,
        })
    }

    /// Windows for a weekday, earliest first.
    #[must_use]
    pub fn windows_on(&self, weekday: Weekday) -> Vec<&WeeklyWindow> {
        let mut windows: Vec<&WeeklyWindow> = self
            .windows
            .iter()
            .filter(|window| window.weekday == weekday)
            .collect();
        windows.sort_by_key(|window| (window.start_local_time, window.end_local_time));
        windows
    }

    /// Windows that apply to a calendar date, earliest first.
    #[must_use]
    pub fn windows_for_date(&self, date: NaiveDate) -> Vec<&WeeklyWindow> {
        self.windows_on(date.weekday())
    }
}

fn check_local_range(
    context: impl std::fmt::Display,
    start: NaiveTime,
    end: NaiveTime,
) -> ScheduleResult<()> {
    if end > start {
        Ok(())
    } else {
        Err(ScheduleError::InvalidTimeRange(format!(
            "{context}: {start} - {end}"
        )))
    }
}
