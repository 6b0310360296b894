//! Persistence seam for availability slots.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use chrono::NaiveDate;
use classbook_schedule::model::AvailabilitySlot;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Availability already exists for teacher {teacher_id} on {date}")]
    Duplicate { teacher_id: Uuid, date: NaiveDate },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Storage for availability slots.
///
/// Implementations must enforce one slot per `(teacher_id, date)` atomically
/// and report a violation as `StoreError::Duplicate`. The in-memory
/// availability check cannot stand in for that constraint: two requests can
/// both pass it before either inserts.
pub trait AvailabilityStore {
    /// ## Summary
    /// Inserts a slot.
    ///
    /// ## Errors
    /// `StoreError::Duplicate` if a slot already exists for the same teacher
    /// and date; `StoreError::Backend` for any other failure.
    fn insert(&self, slot: AvailabilitySlot) -> Result<(), StoreError>;

    /// ## Summary
    /// Returns every stored slot of a teacher, ordered by date.
    ///
    /// ## Errors
    /// `StoreError::Backend` if the slots cannot be read.
    fn slots_for(&self, teacher_id: Uuid) -> Result<Vec<AvailabilitySlot>, StoreError>;
}

/// Mutex-guarded map keyed by `(teacher_id, date)`.
#[derive(Debug, Default)]
pub struct InMemoryAvailabilityStore {
    slots: Mutex<HashMap<(Uuid, NaiveDate), AvailabilitySlot>>,
}

impl InMemoryAvailabilityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("availability store lock poisoned".to_string())
}

impl AvailabilityStore for InMemoryAvailabilityStore {
    fn insert(&self, slot: AvailabilitySlot) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_e| poisoned())?;
        match slots.entry(slot.key()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                teacher_id: slot.teacher_id,
                date: slot.date,
            }),
            Entry::Vacant(entry) => {
                tracing::trace!(teacher_id = %slot.teacher_id, date = %slot.date, "Stored availability slot");
                entry.insert(slot);
                Ok(())
            }
        }
    }

    fn slots_for(&self, teacher_id: Uuid) -> Result<Vec<AvailabilitySlot>, StoreError> {
        let slots = self.slots.lock().map_err(|_e| poisoned())?;
        let mut found: Vec<AvailabilitySlot> = slots
            .values()
            .filter(|slot| slot.teacher_id == teacher_id)
            .cloned()
            .collect();
        found.sort_by_key(|slot| slot.date);
        Ok(found)
    }
}
