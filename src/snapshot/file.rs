//! Single filesystem entry snapshots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a filesystem entry at capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Regular file with content
    #[serde(rename = "file")]
    RegularFile,
    /// Directory (content is not tracked)
    Directory,
    /// Declared path that did not exist
    Missing,
}

impl FileKind {
    /// Stable name used in documents and fingerprints
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegularFile => "file",
            Self::Directory => "directory",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one filesystem entry
///
/// The content hash of a regular file is opaque: the capture side decides
/// what goes into it (content, and whatever metadata it considers relevant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FileSnapshot {
    /// Regular file and its content fingerprint
    #[serde(rename = "file")]
    RegularFile { hash: String },
    /// Directory
    Directory,
    /// Missing entry
    Missing,
}

impl FileSnapshot {
    /// Snapshot of a regular file with the given fingerprint
    pub fn regular_file(hash: impl Into<String>) -> Self {
        Self::RegularFile { hash: hash.into() }
    }

    /// Snapshot of a directory
    pub fn directory() -> Self {
        Self::Directory
    }

    /// Snapshot of a missing entry
    pub fn missing() -> Self {
        Self::Missing
    }

    /// Kind of the entry
    pub fn kind(&self) -> FileKind {
        match self {
            Self::RegularFile { .. } => FileKind::RegularFile,
            Self::Directory => FileKind::Directory,
            Self::Missing => FileKind::Missing,
        }
    }

    /// Content fingerprint, only present for regular files
    pub fn content_hash(&self) -> Option<&str> {
        match self {
            Self::RegularFile { hash } => Some(hash),
            Self::Directory | Self::Missing => None,
        }
    }

    /// Whether this entry is unchanged relative to another snapshot of the same path.
    ///
    /// Regular files compare by fingerprint. Directories and missing entries
    /// only need the same kind. Symmetric by construction.
    pub fn is_content_and_metadata_up_to_date(&self, other: &FileSnapshot) -> bool {
        match (self, other) {
            (Self::RegularFile { hash: a }, Self::RegularFile { hash: b }) => a == b,
            (Self::Directory, Self::Directory) => true,
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }
}
