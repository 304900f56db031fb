//! Filesystem snapshot data model
//!
//! Snapshots are captured elsewhere and handed over already built. This
//! module only models them: single entries, immutable path-keyed sets, and
//! the JSON document used to exchange per-task property snapshots.

pub mod document;
pub mod file;
pub mod set;

pub use document::TaskSnapshots;
pub use file::{FileKind, FileSnapshot};
pub use set::{SnapshotSet, SnapshotSetBuilder};

use std::collections::BTreeMap;

/// Snapshot sets of a task keyed by output property name
pub type PropertySnapshots = BTreeMap<String, SnapshotSet>;
