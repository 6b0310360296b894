//! In-process scheduling facade for the Classbook console.
//!
//! The REST/UI layer calls into [`scheduling::service::SchedulingService`]
//! with snapshots it has loaded; persistence stays behind the
//! [`store::AvailabilityStore`] trait.

pub mod error;
pub mod scheduling;
pub mod snapshot;
pub mod store;
