use classbook_schedule::availability::AvailabilityRejection;
use thiserror::Error;

use crate::store::StoreError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    ScheduleError(#[from] classbook_schedule::error::ScheduleError),

    #[error("Rejected ({code}): {0}", code = .0.code())]
    Rejected(#[from] AvailabilityRejection),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // A uniqueness violation at the store is the same client-visible
            // outcome as the in-memory pre-check.
            StoreError::Duplicate { .. } => Self::Rejected(AvailabilityRejection::AlreadyAvailable),
            StoreError::Backend(message) => Self::Storage(message),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
