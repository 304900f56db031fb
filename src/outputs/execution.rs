//! Per-task execution analysis
//!
//! A task declares several named output properties. Overlap detection runs
//! over all of them before the task executes; output snapshots are assembled
//! per property once it has finished.

use super::assemble::{build_output_snapshot, OutputSnapshot};
use super::overlap::{detect_overlap, OverlappingOutputs};
use crate::snapshot::{PropertySnapshots, SnapshotSet};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Knobs for [`analyze_execution_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Run overlapping output detection
    pub detect_overlaps: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            detect_overlaps: true,
        }
    }
}

/// Outcome of analysing one task execution
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionAnalysis {
    /// Overlap found before the execution, if any
    pub overlapping: Option<OverlappingOutputs>,

    /// Output snapshot per output property
    pub outputs: BTreeMap<String, OutputSnapshot>,
}

impl ExecutionAnalysis {
    /// Whether the task's outputs may be stored in and reused from the cache
    pub fn is_cacheable(&self) -> bool {
        self.overlapping.is_none()
    }

    /// Reason output caching is disabled, if it is
    pub fn caching_disabled_reason(&self) -> Option<String> {
        self.overlapping
            .as_ref()
            .map(OverlappingOutputs::caching_disabled_reason)
    }

    /// Snapshots to persist as the baseline for the next execution
    pub fn recorded_outputs(&self) -> PropertySnapshots {
        self.outputs
            .iter()
            .map(|(property, output)| (property.clone(), output.snapshot.clone()))
            .collect()
    }

    /// Properties whose output snapshot had foreign entries removed
    pub fn filtered_properties(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .filter(|(_, output)| output.filtered)
            .map(|(property, _)| property.as_str())
    }
}

/// Detect overlapping outputs over every output property of a task.
///
/// Properties are checked in name order. A property without a previous
/// record, or a task without any previous execution, is compared against an
/// empty set.
pub fn detect_task_overlap(
    previous_execution: Option<&PropertySnapshots>,
    before_execution: &PropertySnapshots,
) -> Option<OverlappingOutputs> {
    let empty = SnapshotSet::empty();

    before_execution.iter().find_map(|(property, before)| {
        let previous = previous_execution
            .and_then(|previous| previous.get(property))
            .unwrap_or(&empty);
        detect_overlap(property, previous, before)
    })
}

/// Run overlap detection and output assembly for one task execution
pub fn analyze_execution(
    previous_execution: Option<&PropertySnapshots>,
    before_execution: &PropertySnapshots,
    after_execution: &PropertySnapshots,
) -> ExecutionAnalysis {
    analyze_execution_with(
        previous_execution,
        before_execution,
        after_execution,
        AnalysisOptions::default(),
    )
}

/// [`analyze_execution`] with explicit options
pub fn analyze_execution_with(
    previous_execution: Option<&PropertySnapshots>,
    before_execution: &PropertySnapshots,
    after_execution: &PropertySnapshots,
    options: AnalysisOptions,
) -> ExecutionAnalysis {
    let overlapping = if options.detect_overlaps {
        detect_task_overlap(previous_execution, before_execution)
    } else {
        debug!("Overlap detection disabled");
        None
    };

    ExecutionAnalysis {
        overlapping,
        outputs: build_task_outputs(previous_execution, before_execution, after_execution),
    }
}

/// Build the output snapshot of every after-execution property.
///
/// A property absent before the execution has an empty baseline and passes
/// through unchanged.
pub fn build_task_outputs(
    previous_execution: Option<&PropertySnapshots>,
    before_execution: &PropertySnapshots,
    after_execution: &PropertySnapshots,
) -> BTreeMap<String, OutputSnapshot> {
    let empty = SnapshotSet::empty();

    after_execution
        .iter()
        .map(|(property, after)| {
            let previous = previous_execution.and_then(|previous| previous.get(property));
            let before = before_execution.get(property).unwrap_or(&empty);
            (property.clone(), build_output_snapshot(previous, before, after))
        })
        .collect()
}
