//! Concrete class sessions.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use classbook_core::types::TimezoneOffset;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::time::local_date;

/// One dated, timed occurrence of a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    /// 1-based position in the series, fixed at expansion time.
    pub sequence_number: u32,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    #[serde(default)]
    pub is_rescheduled: bool,
    /// Start instant before the most recent reschedule. Audit only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rescheduled_from: Option<DateTime<Utc>>,
}

impl Session {
    /// ## Summary
    /// Creates a session that has never been rescheduled.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` if `end_instant <= start_instant`.
    pub fn scheduled(
        id: Uuid,
        sequence_number: u32,
        start_instant: DateTime<Utc>,
        end_instant: DateTime<Utc>,
    ) -> ScheduleResult<Self> {
        ensure_ordered(start_instant, end_instant)?;
        Ok(Self {
            id,
            sequence_number,
            start_instant,
            end_instant,
            is_rescheduled: false,
            rescheduled_from: None,
        })
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_instant - self.start_instant
    }

    /// Calendar date the session starts on, as seen at `offset`.
    #[must_use]
    pub fn local_date(&self, offset: TimezoneOffset) -> NaiveDate {
        local_date(self.start_instant, offset)
    }
}

/// ## Summary
/// Checks that an instant window is non-empty.
///
/// ## Errors
/// Returns `ScheduleError::InvalidTimeRange` if `end <= start`.
pub fn ensure_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<()> {
    if end > start {
        Ok(())
    } else {
        Err(ScheduleError::InvalidTimeRange(format!(
            "{} - {}",
            start.to_rfc3339(),
            end.to_rfc3339()
        )))
    }
}
