//! Booking-creation requests as submitted from the admin console.

use chrono::{NaiveDate, NaiveTime};
use classbook_schedule::model::WeekdayRule;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A class to be created. Times are the teacher's wall-clock times; the
/// service applies its configured offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassBooking {
    pub batch_id: Uuid,
    pub teacher_id: Uuid,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
    #[serde(default)]
    pub class_link: String,
    pub schedule: NewSchedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NewSchedule {
    Recurring {
        start_date: NaiveDate,
        weekday_rules: Vec<WeekdayRule>,
        session_count: u32,
    },
    Single {
        date: NaiveDate,
        local_start_time: NaiveTime,
        local_end_time: NaiveTime,
    },
}
