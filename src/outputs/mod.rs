//! Output ownership decisions
//!
//! Decides, from snapshots taken at three points in time, whether a task's
//! output location was touched by someone else between runs and which
//! entries captured after a run are really the task's outputs.
//!
//! | Point in time | Used by |
//! |---------------|---------|
//! | Recorded outputs of the previous execution | detection, classification |
//! | Immediately before this execution | detection, classification |
//! | Immediately after this execution | classification |
//!
//! Everything here is a pure function over immutable snapshot sets and is
//! safe to call from many tasks concurrently.

pub mod assemble;
pub mod classify;
pub mod execution;
pub mod overlap;

pub use assemble::{build_output_snapshot, OutputSnapshot};
pub use classify::{classify_entry, OutputVerdict};
pub use execution::{
    analyze_execution, analyze_execution_with, build_task_outputs, detect_task_overlap,
    AnalysisOptions, ExecutionAnalysis,
};
pub use overlap::{detect_overlap, OverlappingOutputs};
