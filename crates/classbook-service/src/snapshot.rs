//! Calendar snapshots as loaded by a calendar view.

use classbook_schedule::model::{AvailabilitySlot, ClassBooking};
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;

/// Bookings and availability loaded together for one calendar view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSnapshot {
    #[serde(default)]
    pub bookings: Vec<ClassBooking>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

impl CalendarSnapshot {
    /// ## Summary
    /// Checks every booking's structural invariants and every slot's window.
    ///
    /// ## Errors
    /// Returns the first booking or slot validation error.
    pub fn validate(&self) -> ServiceResult<()> {
        for booking in &self.bookings {
            booking.validate()?;
        }
        for slot in &self.availability {
            slot.validate()?;
        }
        Ok(())
    }
}
