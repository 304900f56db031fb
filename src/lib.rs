//! outguard - output ownership decisions for incremental builds
//!
//! Given snapshots of a task's declared output locations taken after its
//! previous execution, right before the current one, and right after it,
//! decides whether someone else wrote into those locations (overlapping
//! outputs) and which captured entries are really the task's outputs.

pub mod cli;
pub mod config;
pub mod error;
pub mod outputs;
pub mod snapshot;
pub mod ui;

pub use error::{OutguardError, OutguardResult};
