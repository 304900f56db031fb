//! Output snapshot assembly
//!
//! Applies the classifier to every after-execution entry and decides what
//! gets recorded as the task's outputs.

use super::classify::classify_entry;
use crate::snapshot::SnapshotSet;
use serde::Serialize;
use tracing::debug;

/// Snapshot recorded as the task's outputs
#[derive(Debug, Clone, Serialize)]
pub struct OutputSnapshot {
    /// Entries owned by the task
    pub snapshot: SnapshotSet,

    /// True when foreign entries were dropped. A filtered snapshot carries no
    /// aggregate fingerprint; an unfiltered one is the after-execution set
    /// itself and may reuse its fingerprint.
    pub filtered: bool,

    /// Paths present after execution that were not accepted as outputs
    pub excluded: Vec<String>,
}

impl OutputSnapshot {
    fn unfiltered(snapshot: &SnapshotSet) -> Self {
        Self {
            snapshot: snapshot.clone(),
            filtered: false,
            excluded: Vec::new(),
        }
    }

    /// Whether the after-execution fingerprint may be reused for caching
    pub fn fingerprint_reusable(&self) -> bool {
        !self.filtered
    }
}

/// Build the output snapshot for one output property.
///
/// When either the before- or the after-execution set is empty there is no
/// baseline to diff against and the after set is accepted as is.
pub fn build_output_snapshot(
    after_previous_execution: Option<&SnapshotSet>,
    before_execution: &SnapshotSet,
    after_execution: &SnapshotSet,
) -> OutputSnapshot {
    if before_execution.is_empty() || after_execution.is_empty() {
        return OutputSnapshot::unfiltered(after_execution);
    }

    let mut accepted = SnapshotSet::builder();
    let mut excluded = Vec::new();

    for (path, snapshot) in after_execution {
        let verdict = classify_entry(path, snapshot, before_execution, after_previous_execution);
        if verdict.is_output() {
            accepted.insert(path.as_str(), snapshot.clone());
        } else {
            debug!("Excluding {} from outputs ({})", path, verdict);
            excluded.push(path.clone());
        }
    }

    if accepted.len() == after_execution.len() {
        return OutputSnapshot::unfiltered(after_execution);
    }

    debug!(
        "Filtered output snapshot: kept {} of {} entries",
        accepted.len(),
        after_execution.len()
    );
    OutputSnapshot {
        snapshot: accepted.build_without_fingerprint(),
        filtered: true,
        excluded,
    }
}
