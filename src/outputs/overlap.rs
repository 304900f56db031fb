//! Overlapping output detection
//!
//! Flags regular files that showed up in a task's output location since the
//! task's previous execution without that execution having recorded them.

use crate::snapshot::{FileKind, SnapshotSet};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// A path in an output property that the task did not produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlappingOutputs {
    /// Output property the path belongs to
    pub property_name: String,
    /// Offending path
    pub path: String,
}

impl OverlappingOutputs {
    /// Create a new overlap signal
    pub fn new(property_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            path: path.into(),
        }
    }

    /// Why output caching should be turned off for the task
    pub fn caching_disabled_reason(&self) -> String {
        format!(
            "Unknown origin of file '{}' ({}). Output caching requires exclusive ownership of output paths.",
            self.path, self
        )
    }
}

impl fmt::Display for OverlappingOutputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output property '{}' with path '{}'",
            self.property_name, self.path
        )
    }
}

/// Detect a regular file that exists before this execution but was not part
/// of the previous execution's recorded outputs.
///
/// Directories are skipped: a directory inside an output property cannot be
/// told apart from the property's own root directory. Missing entries have
/// nothing to compare. Any single offending path is returned; which one is
/// not specified when several qualify.
pub fn detect_overlap(
    property_name: &str,
    previous_execution: &SnapshotSet,
    before_execution: &SnapshotSet,
) -> Option<OverlappingOutputs> {
    let (path, _) = before_execution.iter().find(|(path, snapshot)| {
        snapshot.kind() == FileKind::RegularFile && !previous_execution.contains(path)
    })?;

    info!(
        "Overlapping output in property '{}': {}",
        property_name, path
    );
    Some(OverlappingOutputs::new(property_name, path.as_str()))
}
