//! JSON snapshot documents exchanged with the capture side
//!
//! One document holds every output property of a single task at one moment.
//! Output snapshots are written back in the same shape so they can serve as
//! the previous-execution input of the next run.

use super::{FileSnapshot, PropertySnapshots};
use crate::error::{OutguardError, OutguardResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Snapshots of all output properties of one task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshots {
    /// Task path, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Property name to snapshot set
    #[serde(default)]
    pub properties: PropertySnapshots,
}

impl TaskSnapshots {
    /// Create a document from already built property snapshots
    pub fn new(task: Option<String>, properties: PropertySnapshots) -> Self {
        Self { task, properties }
    }

    /// Load and validate a document from disk
    pub fn load(path: &Path) -> OutguardResult<Self> {
        if !path.exists() {
            return Err(OutguardError::SnapshotNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            OutguardError::io(format!("reading snapshot document {}", path.display()), e)
        })?;

        let document = Self::parse(&content, path)?;
        debug!(
            "Loaded {} properties from {}",
            document.properties.len(),
            path.display()
        );
        Ok(document)
    }

    /// Parse and validate a document; `origin` is only used in error messages
    pub fn parse(content: &str, origin: &Path) -> OutguardResult<Self> {
        let document: Self = serde_json::from_str(content)
            .map_err(|e| OutguardError::snapshot_invalid(origin, e.to_string()))?;
        document.validate(origin)?;
        Ok(document)
    }

    /// Write the document as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> OutguardResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                OutguardError::io(format!("creating directory {}", parent.display()), e)
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            OutguardError::io(format!("writing snapshot document {}", path.display()), e)
        })?;

        debug!("Wrote snapshot document {}", path.display());
        Ok(())
    }

    /// Total number of entries over all properties
    pub fn entry_count(&self) -> usize {
        self.properties.values().map(|set| set.len()).sum()
    }

    fn validate(&self, origin: &Path) -> OutguardResult<()> {
        for (property, set) in &self.properties {
            if property.is_empty() {
                return Err(OutguardError::snapshot_invalid(
                    origin,
                    "empty output property name",
                ));
            }
            for (path, snapshot) in set {
                if path.is_empty() {
                    return Err(OutguardError::snapshot_invalid(
                        origin,
                        format!("empty path in property '{}'", property),
                    ));
                }
                if let FileSnapshot::RegularFile { hash } = snapshot {
                    if hash.is_empty() {
                        return Err(OutguardError::snapshot_invalid(
                            origin,
                            format!("regular file '{}' has an empty hash", path),
                        ));
                    }
                    if hex::decode(hash).is_err() {
                        return Err(OutguardError::snapshot_invalid(
                            origin,
                            format!("regular file '{}' has a non-hex hash", path),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
