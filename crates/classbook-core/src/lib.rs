//! Shared primitives for the Classbook scheduling workspace.
//!
//! Holds the pieces every other crate agrees on: the fixed timezone offset,
//! calendar-month scoping, configuration loading and the core error type.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
