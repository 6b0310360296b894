//! Classbook command-line front end.

pub mod command;
pub mod report;
