//! Three-way output ownership classification

use crate::snapshot::{FileSnapshot, SnapshotSet};
use std::fmt;

/// Why an after-execution entry is, or is not, an output of the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputVerdict {
    /// Did not exist before the execution
    Created,
    /// Existed before and was changed by the execution
    Modified,
    /// Unchanged, but already recorded as an output after the previous execution
    PreviouslyRecorded,
    /// Unchanged and never produced by the task
    Foreign,
}

impl OutputVerdict {
    /// Whether the entry belongs to the task's output snapshot
    pub fn is_output(&self) -> bool {
        !matches!(self, Self::Foreign)
    }
}

impl fmt::Display for OutputVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::PreviouslyRecorded => "previously recorded",
            Self::Foreign => "foreign",
        };
        f.write_str(name)
    }
}

/// Classify one after-execution entry. First matching rule wins.
///
/// An absent previous-execution record behaves like an empty one.
pub fn classify_entry(
    path: &str,
    after_snapshot: &FileSnapshot,
    before_execution: &SnapshotSet,
    after_previous_execution: Option<&SnapshotSet>,
) -> OutputVerdict {
    let Some(before_snapshot) = before_execution.get(path) else {
        return OutputVerdict::Created;
    };

    if !after_snapshot.is_content_and_metadata_up_to_date(before_snapshot) {
        return OutputVerdict::Modified;
    }

    if after_previous_execution.is_some_and(|previous| previous.contains(path)) {
        return OutputVerdict::PreviouslyRecorded;
    }

    OutputVerdict::Foreign
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(&str, FileSnapshot)]) -> SnapshotSet {
        entries.iter().cloned().collect()
    }

    #[test]
    fn absent_before_is_created() {
        let before = SnapshotSet::empty();
        let verdict = classify_entry("a", &FileSnapshot::regular_file("x"), &before, None);
        assert_eq!(verdict, OutputVerdict::Created);
    }

    #[test]
    fn changed_content_is_modified() {
        let before = set(&[("a", FileSnapshot::regular_file("x"))]);
        let verdict = classify_entry("a", &FileSnapshot::regular_file("y"), &before, None);
        assert_eq!(verdict, OutputVerdict::Modified);
    }

    #[test]
    fn changed_kind_is_modified() {
        let before = set(&[("a", FileSnapshot::missing())]);
        let verdict = classify_entry("a", &FileSnapshot::directory(), &before, None);
        assert_eq!(verdict, OutputVerdict::Modified);
    }

    #[test]
    fn unchanged_and_recorded_is_carried_forward() {
        let before = set(&[("a", FileSnapshot::regular_file("x"))]);
        let previous = set(&[("a", FileSnapshot::regular_file("x"))]);

        let verdict = classify_entry(
            "a",
            &FileSnapshot::regular_file("x"),
            &before,
            Some(&previous),
        );
        assert_eq!(verdict, OutputVerdict::PreviouslyRecorded);
    }

    #[test]
    fn unchanged_and_unrecorded_is_foreign() {
        let before = set(&[("a", FileSnapshot::regular_file("x"))]);
        let previous = set(&[("other", FileSnapshot::regular_file("x"))]);

        let after = FileSnapshot::regular_file("x");
        assert_eq!(
            classify_entry("a", &after, &before, Some(&previous)),
            OutputVerdict::Foreign
        );
        assert_eq!(
            classify_entry("a", &after, &before, None),
            OutputVerdict::Foreign
        );
    }

    #[test]
    fn modification_wins_over_previous_record() {
        let before = set(&[("a", FileSnapshot::regular_file("x"))]);
        let previous = set(&[("a", FileSnapshot::regular_file("x"))]);

        let verdict = classify_entry(
            "a",
            &FileSnapshot::regular_file("y"),
            &before,
            Some(&previous),
        );
        assert_eq!(verdict, OutputVerdict::Modified);
    }

    #[test]
    fn only_foreign_is_not_output() {
        assert!(OutputVerdict::Created.is_output());
        assert!(OutputVerdict::Modified.is_output());
        assert!(OutputVerdict::PreviouslyRecorded.is_output());
        assert!(!OutputVerdict::Foreign.is_output());
    }
}
