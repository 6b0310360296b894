//! JSON documents printed by the `classbook` commands.

use chrono::NaiveDate;
use classbook_schedule::availability::AvailabilityRejection;
use classbook_schedule::model::{AvailabilitySlot, Session};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionReport {
    pub booking_id: Uuid,
    pub sessions: Vec<Session>,
}

/// Everything a day cell of the teacher calendar shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    pub teacher_id: Uuid,
    pub date: NaiveDate,
    pub sessions: Vec<Session>,
    pub availability: Option<AvailabilitySlot>,
    pub can_mark_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<AvailabilityRejection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    pub teacher_id: Uuid,
    pub month: String,
    pub dates_with_sessions: Vec<NaiveDate>,
    pub available_dates: Vec<NaiveDate>,
}
