//! Value types for bookings, sessions and teacher availability.

pub mod availability;
pub mod booking;
pub mod rule;
pub mod session;

pub use availability::{AvailabilitySlot, WeeklyAvailabilityTemplate, WeeklyWindow};
pub use booking::{BookingSchedule, ClassBooking};
pub use rule::{RecurrenceRule, WeekdayRule};
pub use session::Session;
