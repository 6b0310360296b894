//! Classbook integration test support.
//!
//! Re-exports the workspace crates under a single `component` path so the
//! integration tests read the same whichever crate an item lives in.

pub mod component {
    pub use classbook_core::{config, constants, types};
    pub use classbook_schedule::{availability, expand, index, model, reschedule, time};
    pub use classbook_service::{scheduling, snapshot, store};

    pub mod error {
        pub use classbook_core::error::*;
        pub use classbook_schedule::error::*;
        pub use classbook_service::error::*;
    }
}
