use std::str::FromStr;

use chrono::{Datelike, FixedOffset, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::constants::{IST_OFFSET_MINUTES, MAX_OFFSET_MINUTES};
use crate::error::{CoreError, CoreResult};

/// A fixed offset from UTC, in whole minutes east of Greenwich.
///
/// There is no daylight-saving awareness: the same offset applies to every
/// date. Serialises as the bare number of minutes (`330` for IST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TimezoneOffset {
    minutes: i32,
    fixed: FixedOffset,
}

impl TimezoneOffset {
    pub const UTC: Self = Self::from_valid_minutes(0);
    pub const IST: Self = Self::from_valid_minutes(IST_OFFSET_MINUTES);

    const fn from_valid_minutes(minutes: i32) -> Self {
        match FixedOffset::east_opt(minutes * 60) {
            Some(fixed) => Self { minutes, fixed },
            None => panic!("offset constant out of range"),
        }
    }

    /// ## Summary
    /// Builds an offset from a signed number of minutes.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the offset is a full day or more.
    pub fn from_minutes(minutes: i32) -> CoreResult<Self> {
        let out_of_range =
            || CoreError::InvalidInput(format!("timezone offset out of range: {minutes} minutes"));
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(out_of_range());
        }
        let fixed = FixedOffset::east_opt(minutes * 60).ok_or_else(out_of_range)?;

        Ok(Self { minutes, fixed })
    }

    #[must_use]
    pub const fn minutes(self) -> i32 {
        self.minutes
    }

    /// The same offset as a chrono timezone.
    #[must_use]
    pub const fn fixed(self) -> FixedOffset {
        self.fixed
    }

    /// Offset as a signed duration, suitable for wall-clock arithmetic.
    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.minutes))
    }
}

impl Default for TimezoneOffset {
    fn default() -> Self {
        Self::IST
    }
}

impl TryFrom<i32> for TimezoneOffset {
    type Error = CoreError;

    fn try_from(minutes: i32) -> CoreResult<Self> {
        Self::from_minutes(minutes)
    }
}

impl From<TimezoneOffset> for i32 {
    fn from(offset: TimezoneOffset) -> Self {
        offset.minutes
    }
}

impl std::fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let total = self.minutes.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", total / 60, total % 60)
    }
}

/// One calendar month, used to scope calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarMonth {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl CalendarMonth {
    /// ## Summary
    /// Builds the month `year`-`month` (1-based month).
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the month does not exist or lies at
    /// the edge of the representable date range.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidInput(format!("no such month: {year}-{month:02}"));
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// ## Summary
    /// Returns the month a date falls in.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` for dates in the final representable month.
    pub fn containing(date: NaiveDate) -> CoreResult<Self> {
        Self::new(date.year(), date.month())
    }

    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    #[must_use]
    pub const fn last_day(self) -> NaiveDate {
        self.last_day
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        (self.first_day..=self.last_day).contains(&date)
    }

    /// Every date of the month in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let last_day = self.last_day;
        self.first_day
            .iter_days()
            .take_while(move |day| *day <= last_day)
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for CalendarMonth {
    type Err = CoreError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidInput(format!("expected YYYY-MM, got {s:?}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_e| invalid())?;
        let month = month.parse::<u32>().map_err(|_e| invalid())?;
        Self::new(year, month)
    }
}
