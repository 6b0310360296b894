//! Weekly recurrence rules.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Weekday};
use classbook_core::types::TimezoneOffset;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Class hours on one weekday, in the teacher's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayRule {
    pub weekday: Weekday,
    pub local_start_time: NaiveTime,
    pub local_end_time: NaiveTime,
}

impl WeekdayRule {
    #[must_use]
    pub const fn new(
        weekday: Weekday,
        local_start_time: NaiveTime,
        local_end_time: NaiveTime,
    ) -> Self {
        Self {
            weekday,
            local_start_time,
            local_end_time,
        }
    }

    /// ## Summary
    /// Checks that the class ends after it starts.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` if `end <= start`.
    pub fn check_time_range(&self) -> ScheduleResult<()> {
        if self.local_end_time > self.local_start_time {
            Ok(())
        } else {
            Err(ScheduleError::InvalidTimeRange(format!(
                "{}: {} - {}",
                self.weekday, self.local_start_time, self.local_end_time
            )))
        }
    }
}

/// Abstract weekly pattern from which a recurring booking's sessions are derived.
///
/// Never mutated once expanded; changing the pattern means creating a new booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub start_date: NaiveDate,
    pub weekday_rules: Vec<WeekdayRule>,
    pub session_count: u32,
    pub timezone_offset_minutes: TimezoneOffset,
}

impl RecurrenceRule {
    /// Rule for a given weekday, if classes are held that day.
    #[must_use]
    pub fn rule_for(&self, weekday: Weekday) -> Option<&WeekdayRule> {
        self.weekday_rules.iter().find(|rule| rule.weekday == weekday)
    }

    /// ## Summary
    /// Validates the rule before expansion.
    ///
    /// ## Errors
    /// - `InvalidRecurrenceRule` if there are no weekday rules, the session
    ///   count is zero, or a weekday appears twice.
    /// - `InvalidTimeRange` if any weekday rule ends at or before its start.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.weekday_rules.is_empty() {
            return Err(ScheduleError::InvalidRecurrenceRule(
                "at least one weekday rule is required".to_string(),
            ));
        }
        if self.session_count < 1 {
            return Err(ScheduleError::InvalidRecurrenceRule(
                "session count must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.weekday_rules.len());
        for rule in &self.weekday_rules {
            if !seen.insert(rule.weekday) {
                return Err(ScheduleError::InvalidRecurrenceRule(format!(
                    "more than one rule for {}",
                    rule.weekday
                )));
            }
            rule.check_time_range()?;
        }

        Ok(())
    }
}
