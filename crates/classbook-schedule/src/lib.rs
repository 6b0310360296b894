//! Recurring-class scheduling for Classbook.
//!
//! Everything in this crate is a pure function over in-memory values:
//! converting wall-clock times to instants, expanding a weekly recurrence into
//! sessions, indexing a calendar snapshot per day, deciding whether a day may
//! be marked available, and rescheduling a single session.

pub mod availability;
pub mod error;
pub mod expand;
pub mod index;
pub mod model;
pub mod reschedule;
pub mod time;
